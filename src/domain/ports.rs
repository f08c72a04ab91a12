use super::amount::TokenAmount;
use super::bill::{Bill, NewBill};
use crate::error::Result;
use alloy_primitives::{Address, B256};
use async_trait::async_trait;

/// Outcome of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
}

/// The wallet the user authorizes this client with.
///
/// Besides permission and account listing, the provider hands out contract handles bound to
/// an address; every transaction sent through them is signed by the wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Asks the user to authorize the client. May prompt.
    async fn enable(&self) -> Result<()>;
    async fn accounts(&self) -> Result<Vec<Address>>;
    fn ledger(&self, address: Address) -> LedgerContractBox;
    fn token(&self, address: Address) -> TokenContractBox;
}

/// The bill ledger contract:
/// `getBill(uint) view`, `createBill(uint,uint,uint,uint)`, `payBill(uint)`.
#[async_trait]
pub trait LedgerContract: Send + Sync {
    /// Read-only call; sends no transaction.
    async fn get_bill(&self, month: u64) -> Result<Bill>;
    async fn create_bill(&self, from: Address, bill: NewBill) -> Result<TxReceipt>;
    async fn pay_bill(&self, from: Address, month: u64) -> Result<TxReceipt>;
}

/// The fungible payment token (ERC-20 style).
#[async_trait]
pub trait TokenContract: Send + Sync {
    async fn approve(
        &self,
        from: Address,
        spender: Address,
        amount: TokenAmount,
    ) -> Result<TxReceipt>;
    async fn balance_of(&self, owner: Address) -> Result<TokenAmount>;
}

pub type WalletProviderBox = Box<dyn WalletProvider>;
pub type LedgerContractBox = Box<dyn LedgerContract>;
pub type TokenContractBox = Box<dyn TokenContract>;
