use crate::application::gateway::ContractGateway;
use crate::application::notifier::Notifier;
use crate::application::repository::BillRepository;
use crate::application::session::WalletSession;
use crate::config::Config;
use crate::domain::amount::TokenAmount;
use crate::domain::bill::Bill;
use crate::domain::ports::{TxReceipt, WalletProviderBox};
use crate::error::{BillPayError, Result};
use crate::interfaces::form::{BillForm, trailing_id};
use crate::interfaces::view::{PageView, render_page};
use tracing::{info, warn};

/// The bill-payment client.
///
/// Owns every piece of run-time state: the contract gateway (and through it the wallet
/// session), the cached bill list, the last balance read and the status banner. The gateway
/// is `None` when the wallet could not be connected, in which case every action only reports
/// that.
///
/// Command handlers (`create_bill`, `approve_payment`, ...) return their outcome untouched. The
/// user-facing entry points (`submit_bill_form`, `click_pay`, `refresh`) sequence them and turn
/// the outcome into a notification.
pub struct BillPayApp {
    config: Config,
    notifier: Notifier,
    gateway: Option<ContractGateway>,
    repository: BillRepository,
    balance: Option<TokenAmount>,
}

impl BillPayApp {
    /// Creates a new, unconnected `BillPayApp`.
    ///
    /// # Arguments
    ///
    /// * `config` - Contract addresses and display settings for the run.
    ///
    /// Use [`BillPayApp::start`] to also connect and load.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            notifier: Notifier::new(),
            gateway: None,
            repository: BillRepository::new(),
            balance: None,
        }
    }

    /// Runs the page-load sequence: connect the wallet, then read balance, then bills.
    ///
    /// Stops at the first failure and leaves it on the banner.
    pub async fn start(provider: Option<WalletProviderBox>, config: Config) -> Self {
        let mut app = Self::new(config);
        app.notifier.show("⌛ Loading...");

        if provider.is_some() {
            app.notifier.show("⚠️ Please approve this DApp to use it.");
        }
        match WalletSession::connect(provider).await {
            Ok(session) => {
                app.notifier.clear();
                app.gateway = Some(ContractGateway::new(session, &app.config));
            }
            Err(error) => {
                app.notify_error(&error);
                return app;
            }
        }

        if let Err(error) = app.refresh_balance().await {
            app.notify_error(&error);
            return app;
        }
        if let Err(error) = app.refresh_bills().await {
            app.notify_error(&error);
            return app;
        }
        app.notifier.clear();
        app
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Whether a wallet session was established.
    pub fn is_connected(&self) -> bool {
        self.gateway.is_some()
    }

    pub fn bills(&self) -> &[Bill] {
        self.repository.bills()
    }

    /// The last balance read, `None` until one succeeded.
    pub fn balance(&self) -> Option<TokenAmount> {
        self.balance
    }

    /// Renders the current state: balance, banner and one card per cached bill.
    pub fn render(&self) -> PageView {
        render_page(
            self.balance.as_ref(),
            self.repository.bills(),
            self.notifier.current(),
            &self.config,
        )
    }

    fn gateway(&self) -> Result<&ContractGateway> {
        self.gateway.as_ref().ok_or(BillPayError::NotConnected)
    }

    fn notify_error(&mut self, error: &BillPayError) {
        warn!(%error, "operation failed");
        self.notifier.show(format!("⚠️ {error}."));
    }

    /// Reads the signer's balance and caches it for display.
    pub async fn refresh_balance(&mut self) -> Result<TokenAmount> {
        let balance = self.gateway()?.balance().await?;
        self.balance = Some(balance);
        Ok(balance)
    }

    /// Replaces the cached bill list with a fresh read of all twelve months.
    pub async fn refresh_bills(&mut self) -> Result<()> {
        let gateway = self.gateway.as_ref().ok_or(BillPayError::NotConnected)?;
        self.repository.fetch_all(gateway).await?;
        Ok(())
    }

    /// Sends `createBill` for the form's values.
    pub async fn create_bill(&self, form: &BillForm) -> Result<TxReceipt> {
        let gateway = self.gateway()?;
        let bill = form.to_new_bill(self.config.decimals)?;
        gateway.create_bill(bill).await
    }

    /// Resolves a clicked pay action to the cached bill at that 1-based position.
    ///
    /// A paid bill has no pay action, so its id resolves to nothing.
    pub fn resolve_pay_target(&self, element_id: &str) -> Result<Bill> {
        let position = trailing_id(element_id)?;
        self.repository
            .by_position(position)
            .filter(|bill| !bill.is_paid)
            .cloned()
            .ok_or_else(|| BillPayError::UnknownBill(element_id.to_string()))
    }

    /// First payment step: allow the ledger to pull the bill's total.
    pub async fn approve_payment(&self, bill: &Bill) -> Result<TxReceipt> {
        self.gateway()?.approve(bill.total).await
    }

    /// Second payment step: settle the bill. Needs a prior [`BillPayApp::approve_payment`].
    pub async fn settle_payment(&self, bill: &Bill) -> Result<TxReceipt> {
        self.gateway()?.pay_bill(bill.month).await
    }

    /// Handles a submitted bill-creation form.
    ///
    /// The bill list is refreshed whether or not the transaction went through.
    pub async fn submit_bill_form(&mut self, form: &BillForm) {
        if !self.is_connected() {
            self.notify_error(&BillPayError::NotConnected);
            return;
        }

        let month = form.month.trim().to_string();
        self.notifier.show(format!("⌛ Adding {month} month bill..."));
        match self.create_bill(form).await {
            Ok(receipt) => {
                info!(month = %month, tx = %receipt.tx_hash, "bill added");
                self.notifier
                    .show(format!("🎉 You successfully added {month} month bill."));
            }
            Err(error) => self.notify_error(&error),
        }

        if let Err(error) = self.refresh_bills().await {
            self.notify_error(&error);
        }
    }

    /// Handles a click on a bill's pay action: approve, then pay, then refresh.
    ///
    /// Clicks on a bill already shown as paid are reported without sending anything. A failed
    /// approval stops the flow before `payBill`. A failed payment after a successful
    /// approval leaves the allowance in place.
    pub async fn click_pay(&mut self, element_id: &str) {
        if !self.is_connected() {
            self.notify_error(&BillPayError::NotConnected);
            return;
        }
        let bill = match self.resolve_pay_target(element_id) {
            Ok(bill) => bill,
            Err(error) => {
                self.notify_error(&error);
                return;
            }
        };

        self.notifier.show("⌛ Waiting for payment approval...");
        if let Err(error) = self.approve_payment(&bill).await {
            self.notify_error(&error);
            return;
        }

        self.notifier
            .show(format!("⌛ Awaiting payment for {} month...", bill.month));
        match self.settle_payment(&bill).await {
            Ok(receipt) => {
                info!(month = bill.month, tx = %receipt.tx_hash, "bill paid");
                self.notifier
                    .show(format!("🎉 You successfully paid {} month.", bill.month));
            }
            Err(error) => {
                self.notify_error(&error);
                return;
            }
        }

        if let Err(error) = self.refresh_bills().await {
            self.notify_error(&error);
        }
        if let Err(error) = self.refresh_balance().await {
            self.notify_error(&error);
        }
    }

    /// Re-reads balance and bills on request.
    pub async fn refresh(&mut self) {
        if let Err(error) = self.refresh_balance().await {
            self.notify_error(&error);
            return;
        }
        if let Err(error) = self.refresh_bills().await {
            self.notify_error(&error);
        }
    }
}
