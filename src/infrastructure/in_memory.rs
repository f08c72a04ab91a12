use crate::config::Config;
use crate::domain::amount::TokenAmount;
use crate::domain::bill::{Bill, MONTHS, NewBill};
use crate::domain::ports::{
    LedgerContract, LedgerContractBox, TokenContract, TokenContractBox, TxReceipt, WalletProvider,
};
use crate::error::{BillPayError, Result};
use alloy_primitives::{Address, keccak256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Which contract operation a call is, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    GetBill(u64),
    CreateBill,
    PayBill,
    Approve,
    BalanceOf,
}

/// A call as it reached the simulated chain, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    GetBill { month: u64 },
    CreateBill { from: Address, bill: NewBill },
    PayBill { from: Address, month: u64 },
    Approve { from: Address, spender: Address, amount: TokenAmount },
    BalanceOf { owner: Address },
}

impl ContractCall {
    pub fn kind(&self) -> CallKind {
        match self {
            ContractCall::GetBill { month } => CallKind::GetBill(*month),
            ContractCall::CreateBill { .. } => CallKind::CreateBill,
            ContractCall::PayBill { .. } => CallKind::PayBill,
            ContractCall::Approve { .. } => CallKind::Approve,
            ContractCall::BalanceOf { .. } => CallKind::BalanceOf,
        }
    }
}

#[derive(Debug)]
struct ChainState {
    ledger_address: Address,
    token_address: Address,
    payee: Address,
    balances: HashMap<Address, TokenAmount>,
    allowances: HashMap<(Address, Address), TokenAmount>,
    bills: HashMap<u64, Bill>,
    calls: Vec<ContractCall>,
    rejections: HashMap<CallKind, String>,
    read_latency: HashMap<u64, Duration>,
    block_number: u64,
}

impl ChainState {
    /// Logs the call and fails it if a rejection was injected for its kind.
    fn enter(&mut self, call: ContractCall) -> Result<()> {
        let kind = call.kind();
        self.calls.push(call);
        match self.rejections.get(&kind) {
            Some(message) => Err(BillPayError::TransactionError(message.clone())),
            None => Ok(()),
        }
    }

    fn mine(&mut self) -> TxReceipt {
        self.block_number += 1;
        TxReceipt {
            tx_hash: keccak256(self.block_number.to_be_bytes()),
            block_number: self.block_number,
        }
    }

    fn balance(&self, owner: &Address) -> TokenAmount {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: Address, spender: Address) -> TokenAmount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }
}

fn revert(message: &str) -> BillPayError {
    BillPayError::TransactionError(message.to_string())
}

fn no_contract(address: Address) -> BillPayError {
    BillPayError::TransactionError(format!("no contract deployed at {address}"))
}

/// A simulated chain holding one bill ledger and one payment token.
///
/// Uses `Arc<RwLock<ChainState>>` so every handle handed out by [`InMemoryWallet`] sees the same
/// state. Serves as the test double for the contract ports and as the backing chain of the
/// command-line front-end.
#[derive(Clone)]
pub struct InMemoryChain {
    state: Arc<RwLock<ChainState>>,
}

impl Default for InMemoryChain {
    fn default() -> Self {
        Self::with_config(&Config::default())
    }
}

impl InMemoryChain {
    /// A chain with the contracts deployed at the default addresses.
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain with the contracts deployed where `config` expects them.
    pub fn with_config(config: &Config) -> Self {
        let state = ChainState {
            ledger_address: config.ledger_address,
            token_address: config.token_address,
            payee: Address::repeat_byte(0xEE),
            balances: HashMap::new(),
            allowances: HashMap::new(),
            bills: HashMap::new(),
            calls: Vec::new(),
            rejections: HashMap::new(),
            read_latency: HashMap::new(),
            block_number: 0,
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Sets the account that receives bill payments.
    pub async fn set_payee(&self, payee: Address) {
        self.state.write().await.payee = payee;
    }

    /// The account that receives bill payments.
    pub async fn payee(&self) -> Address {
        self.state.read().await.payee
    }

    /// Credits `amount` tokens to `owner` out of thin air.
    pub async fn mint(&self, owner: Address, amount: TokenAmount) {
        let mut state = self.state.write().await;
        let balance = state.balance(&owner);
        state.balances.insert(owner, balance + amount);
    }

    pub async fn balance(&self, owner: Address) -> TokenAmount {
        self.state.read().await.balance(&owner)
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> TokenAmount {
        self.state.read().await.allowance(owner, spender)
    }

    /// The stored bill for `month`, `None` if it was never created.
    pub async fn bill(&self, month: u64) -> Option<Bill> {
        self.state.read().await.bills.get(&month).cloned()
    }

    /// Every call received so far, in arrival order.
    pub async fn calls(&self) -> Vec<ContractCall> {
        self.state.read().await.calls.clone()
    }

    pub async fn clear_calls(&self) {
        self.state.write().await.calls.clear();
    }

    /// Makes every subsequent call of `kind` fail with `message`.
    pub async fn reject(&self, kind: CallKind, message: impl Into<String>) {
        self.state
            .write()
            .await
            .rejections
            .insert(kind, message.into());
    }

    /// Lifts a rejection set with [`InMemoryChain::reject`].
    pub async fn accept(&self, kind: CallKind) {
        self.state.write().await.rejections.remove(&kind);
    }

    /// Delays the answer to `getBill(month)`.
    pub async fn set_read_latency(&self, month: u64, latency: Duration) {
        self.state
            .write()
            .await
            .read_latency
            .insert(month, latency);
    }
}

/// Handle on the simulated ledger contract, bound to the address it was requested for.
pub struct InMemoryLedger {
    chain: InMemoryChain,
    address: Address,
}

#[async_trait]
impl LedgerContract for InMemoryLedger {
    async fn get_bill(&self, month: u64) -> Result<Bill> {
        let latency = {
            let mut state = self.chain.state.write().await;
            state.enter(ContractCall::GetBill { month })?;
            if state.ledger_address != self.address {
                return Err(no_contract(self.address));
            }
            state.read_latency.get(&month).copied()
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let state = self.chain.state.read().await;
        Ok(state
            .bills
            .get(&month)
            .cloned()
            .unwrap_or_else(|| Bill::empty(month)))
    }

    async fn create_bill(&self, from: Address, bill: NewBill) -> Result<TxReceipt> {
        let mut state = self.chain.state.write().await;
        state.enter(ContractCall::CreateBill {
            from,
            bill: bill.clone(),
        })?;
        if state.ledger_address != self.address {
            return Err(no_contract(self.address));
        }
        if !MONTHS.contains(&bill.month) {
            return Err(revert("invalid month"));
        }
        if state.bills.get(&bill.month).is_some_and(Bill::is_created) {
            return Err(revert("bill already exists"));
        }

        let total = bill
            .electricity_cost
            .checked_add(bill.water_cost)
            .and_then(|sum| sum.checked_add(bill.internet_cost))
            .ok_or_else(|| revert("arithmetic overflow"))?;

        state.bills.insert(
            bill.month,
            Bill {
                month: bill.month,
                owner: from,
                electricity_cost: bill.electricity_cost,
                water_cost: bill.water_cost,
                internet_cost: bill.internet_cost,
                total,
                is_paid: false,
            },
        );
        Ok(state.mine())
    }

    async fn pay_bill(&self, from: Address, month: u64) -> Result<TxReceipt> {
        let mut state = self.chain.state.write().await;
        state.enter(ContractCall::PayBill { from, month })?;
        if state.ledger_address != self.address {
            return Err(no_contract(self.address));
        }

        let bill = match state.bills.get(&month) {
            Some(bill) if bill.is_created() => bill.clone(),
            _ => return Err(revert("bill does not exist")),
        };
        if bill.is_paid {
            return Err(revert("bill already paid"));
        }

        // Settlement pulls the total through the token allowance.
        let allowance = state.allowance(from, self.address);
        let remaining_allowance = allowance
            .checked_sub(bill.total)
            .ok_or_else(|| revert("ERC20: insufficient allowance"))?;
        let remaining_balance = state
            .balance(&from)
            .checked_sub(bill.total)
            .ok_or_else(|| revert("ERC20: transfer amount exceeds balance"))?;

        let payee = state.payee;
        state.allowances.insert((from, self.address), remaining_allowance);
        state.balances.insert(from, remaining_balance);
        let payee_balance = state.balance(&payee);
        state.balances.insert(payee, payee_balance + bill.total);
        if let Some(stored) = state.bills.get_mut(&month) {
            stored.is_paid = true;
        }
        Ok(state.mine())
    }
}

/// Handle on the simulated payment token.
pub struct InMemoryToken {
    chain: InMemoryChain,
    address: Address,
}

#[async_trait]
impl TokenContract for InMemoryToken {
    async fn approve(
        &self,
        from: Address,
        spender: Address,
        amount: TokenAmount,
    ) -> Result<TxReceipt> {
        let mut state = self.chain.state.write().await;
        state.enter(ContractCall::Approve {
            from,
            spender,
            amount,
        })?;
        if state.token_address != self.address {
            return Err(no_contract(self.address));
        }
        state.allowances.insert((from, spender), amount);
        Ok(state.mine())
    }

    async fn balance_of(&self, owner: Address) -> Result<TokenAmount> {
        let mut state = self.chain.state.write().await;
        state.enter(ContractCall::BalanceOf { owner })?;
        if state.token_address != self.address {
            return Err(no_contract(self.address));
        }
        Ok(state.balance(&owner))
    }
}

/// A wallet whose accounts all sign on the given [`InMemoryChain`].
#[derive(Clone)]
pub struct InMemoryWallet {
    chain: InMemoryChain,
    accounts: Vec<Address>,
    denial: Option<String>,
}

impl InMemoryWallet {
    /// Creates a new wallet that grants permission and lists `accounts` in order.
    ///
    /// # Arguments
    ///
    /// * `chain` - The chain every contract handle of this wallet talks to.
    /// * `accounts` - The accounts the wallet exposes; the first one becomes the signer.
    pub fn new(chain: InMemoryChain, accounts: Vec<Address>) -> Self {
        Self {
            chain,
            accounts,
            denial: None,
        }
    }

    /// Makes the permission prompt fail with `message`.
    pub fn deny_permission(mut self, message: impl Into<String>) -> Self {
        self.denial = Some(message.into());
        self
    }
}

#[async_trait]
impl WalletProvider for InMemoryWallet {
    async fn enable(&self) -> Result<()> {
        match &self.denial {
            Some(message) => Err(BillPayError::WalletError(message.clone())),
            None => Ok(()),
        }
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.accounts.clone())
    }

    fn ledger(&self, address: Address) -> LedgerContractBox {
        Box::new(InMemoryLedger {
            chain: self.chain.clone(),
            address,
        })
    }

    fn token(&self, address: Address) -> TokenContractBox {
        Box::new(InMemoryToken {
            chain: self.chain.clone(),
            address,
        })
    }
}
