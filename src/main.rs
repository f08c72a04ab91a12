use alloy_primitives::{Address, address};
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use paybills::application::app::BillPayApp;
use paybills::config::{Config, EXPLORER_URL, LEDGER_ADDRESS, TOKEN_ADDRESS};
use paybills::domain::amount::TokenAmount;
use paybills::domain::ports::WalletProviderBox;
use paybills::infrastructure::in_memory::{InMemoryChain, InMemoryWallet};
use paybills::interfaces::csv::command_reader::{Action, CommandReader};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::Level;

/// The account the simulated wallet signs with.
const DEMO_ACCOUNT: Address = address!("0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1");

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Script of user actions (CSV: action, month, electricity, water, internet)
    script: PathBuf,

    /// Token balance of the demo account, in display units
    #[arg(long, default_value = "100")]
    funds: String,

    /// Run as if no wallet were installed
    #[arg(long)]
    no_wallet: bool,

    /// Address the client expects the bill ledger at
    #[arg(long, default_value_t = LEDGER_ADDRESS)]
    ledger_address: Address,

    /// Address the client expects the payment token at
    #[arg(long, default_value_t = TOKEN_ADDRESS)]
    token_address: Address,

    /// Account that receives bill payments on the simulated chain
    #[arg(long)]
    payee: Option<Address>,

    #[arg(long, default_value = "cUSD")]
    currency: String,

    #[arg(long, default_value = EXPLORER_URL)]
    explorer_url: String,

    /// Output format of the final page
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log contract calls to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let config = Config {
        ledger_address: cli.ledger_address,
        token_address: cli.token_address,
        currency_symbol: cli.currency.clone(),
        explorer_url: cli.explorer_url.clone(),
        ..Config::default()
    };

    // The simulated contracts always live at the well-known addresses, whatever the client
    // is configured with.
    let chain = InMemoryChain::with_config(&Config::default());
    let funds = TokenAmount::from_display(&cli.funds, config.decimals).into_diagnostic()?;
    chain.mint(DEMO_ACCOUNT, funds).await;
    if let Some(payee) = cli.payee {
        chain.set_payee(payee).await;
    }

    let script = File::open(&cli.script).into_diagnostic()?;

    let provider: Option<WalletProviderBox> = if cli.no_wallet {
        None
    } else {
        Some(Box::new(InMemoryWallet::new(chain, vec![DEMO_ACCOUNT])))
    };
    let mut app = BillPayApp::start(provider, config).await;
    report(&app);

    for command in CommandReader::new(script).commands() {
        match command {
            Ok(command) => {
                match command.action {
                    Action::Create => app.submit_bill_form(&command.to_form()).await,
                    Action::Pay => app.click_pay(&command.pay_target()).await,
                    Action::Refresh => app.refresh().await,
                }
                report(&app);
            }
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    let page = app.render();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Text => write!(out, "{page}").into_diagnostic()?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &page).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
    }

    Ok(())
}

/// Echoes the status banner, if shown.
fn report(app: &BillPayApp) {
    if let Some(text) = app.notifier().current() {
        eprintln!("notice: {text}");
    }
}
