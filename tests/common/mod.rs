#![allow(dead_code)]

use alloy_primitives::Address;
use paybills::application::app::BillPayApp;
use paybills::config::Config;
use paybills::domain::amount::TokenAmount;
use paybills::infrastructure::in_memory::{InMemoryChain, InMemoryWallet};
use std::io::Error;
use tempfile::NamedTempFile;

pub fn account() -> Address {
    Address::repeat_byte(0x0A)
}

/// One token in the smallest unit.
pub fn tokens(whole: u128) -> TokenAmount {
    TokenAmount::from(whole * 1_000_000_000_000_000_000)
}

/// Starts the client against `chain` with a wallet holding only [`account`].
pub async fn connected_app(chain: &InMemoryChain) -> BillPayApp {
    let wallet = InMemoryWallet::new(chain.clone(), vec![account()]);
    BillPayApp::start(Some(Box::new(wallet)), Config::default()).await
}

/// Writes a command script with the standard header.
pub fn write_script(rows: &[&[&str]]) -> Result<NamedTempFile, Error> {
    let file = NamedTempFile::new()?;
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(file.reopen()?);

    wtr.write_record(["action", "month", "electricity", "water", "internet"])?;
    for row in rows {
        wtr.write_record(*row)?;
    }

    wtr.flush()?;
    Ok(file)
}
