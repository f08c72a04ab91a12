use crate::application::session::WalletSession;
use crate::config::Config;
use crate::domain::amount::TokenAmount;
use crate::domain::bill::{Bill, NewBill};
use crate::domain::ports::{LedgerContractBox, TokenContractBox, TxReceipt};
use crate::error::Result;
use alloy_primitives::Address;
use tracing::{debug, info};

/// Typed access to the ledger and token contracts on behalf of the session's signer.
///
/// Both handles are bound to fixed addresses at construction time. Every state-changing call
/// is sent from the signer and resolves once the transaction is mined or rejected; failures
/// carry the remote message unchanged.
pub struct ContractGateway {
    session: WalletSession,
    ledger: LedgerContractBox,
    token: TokenContractBox,
    ledger_address: Address,
}

impl ContractGateway {
    /// Creates a new `ContractGateway` on top of an established session.
    ///
    /// # Arguments
    ///
    /// * `session` - The wallet session whose signer sends every transaction.
    /// * `config` - Where the ledger and token contracts are deployed.
    pub fn new(session: WalletSession, config: &Config) -> Self {
        let provider = session.provider();
        let ledger = provider.ledger(config.ledger_address);
        let token = provider.token(config.token_address);
        Self {
            session,
            ledger,
            token,
            ledger_address: config.ledger_address,
        }
    }

    /// The account transactions are sent from.
    pub fn signer(&self) -> Address {
        self.session.signer()
    }

    /// Reads one ledger slot. Never-created months come back as the default record.
    pub async fn get_bill(&self, month: u64) -> Result<Bill> {
        debug!(month, "getBill");
        self.ledger.get_bill(month).await
    }

    /// Sends `createBill` from the signer and waits for it to be mined.
    pub async fn create_bill(&self, bill: NewBill) -> Result<TxReceipt> {
        debug!(month = bill.month, "sending createBill");
        let receipt = self.ledger.create_bill(self.signer(), bill).await?;
        info!(tx = %receipt.tx_hash, block = receipt.block_number, "createBill mined");
        Ok(receipt)
    }

    /// Sends `payBill` from the signer. The ledger pulls the total through a prior allowance.
    pub async fn pay_bill(&self, month: u64) -> Result<TxReceipt> {
        debug!(month, "sending payBill");
        let receipt = self.ledger.pay_bill(self.signer(), month).await?;
        info!(tx = %receipt.tx_hash, block = receipt.block_number, "payBill mined");
        Ok(receipt)
    }

    /// Lets the ledger contract pull `amount` from the signer's token balance.
    pub async fn approve(&self, amount: TokenAmount) -> Result<TxReceipt> {
        debug!(%amount, spender = %self.ledger_address, "sending approve");
        let receipt = self
            .token
            .approve(self.signer(), self.ledger_address, amount)
            .await?;
        info!(tx = %receipt.tx_hash, block = receipt.block_number, "approve mined");
        Ok(receipt)
    }

    /// The signer's token balance in the smallest unit.
    pub async fn balance(&self) -> Result<TokenAmount> {
        self.token.balance_of(self.signer()).await
    }
}
