use crate::application::gateway::ContractGateway;
use crate::domain::bill::{Bill, MONTHS};
use crate::error::{BillPayError, Result};
use futures::future::try_join_all;
use tracing::debug;

/// The in-memory copy of all twelve bill slots.
///
/// The list is only ever replaced as a whole by [`BillRepository::fetch_all`]; readers get a
/// snapshot slice.
#[derive(Debug, Default)]
pub struct BillRepository {
    bills: Vec<Bill>,
}

impl BillRepository {
    /// Creates an empty repository; nothing is cached until the first fetch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every month from the ledger and replaces the stored list.
    ///
    /// The twelve calls are in flight together; they may settle in any order but the result is
    /// always month-ascending. Any single failure fails the whole refresh and leaves the previous
    /// list untouched.
    pub async fn fetch_all(&mut self, gateway: &ContractGateway) -> Result<&[Bill]> {
        let pending = MONTHS.map(|month| async move {
            let mut bill = gateway.get_bill(month).await?;
            bill.month = month;
            Ok::<_, BillPayError>(bill)
        });

        let bills = try_join_all(pending).await?;
        debug!(count = bills.len(), "bills refreshed");
        self.bills = bills;
        Ok(&self.bills)
    }

    /// The last fetched list, month-ascending. Empty before the first successful fetch.
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Looks up a bill by its 1-based position in the cached list.
    pub fn by_position(&self, position: usize) -> Option<&Bill> {
        position.checked_sub(1).and_then(|index| self.bills.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::WalletSession;
    use crate::config::Config;
    use crate::domain::amount::TokenAmount;
    use crate::domain::bill::NewBill;
    use crate::infrastructure::in_memory::{CallKind, InMemoryChain, InMemoryWallet};
    use alloy_primitives::Address;
    use std::time::{Duration, Instant};

    async fn setup() -> (InMemoryChain, ContractGateway) {
        let config = Config::default();
        let chain = InMemoryChain::with_config(&config);
        let wallet = InMemoryWallet::new(chain.clone(), vec![Address::repeat_byte(0x01)]);
        let session = WalletSession::connect(Some(Box::new(wallet))).await.unwrap();
        let gateway = ContractGateway::new(session, &config);
        (chain, gateway)
    }

    #[tokio::test]
    async fn test_fetch_all_returns_twelve_in_order() {
        let (chain, gateway) = setup().await;
        // Earlier months answer last.
        for month in MONTHS {
            chain
                .set_read_latency(month, Duration::from_millis((13 - month) * 3))
                .await;
        }

        let mut repo = BillRepository::new();
        let bills = repo.fetch_all(&gateway).await.unwrap();

        let months: Vec<u64> = bills.iter().map(|b| b.month).collect();
        assert_eq!(months, MONTHS.collect::<Vec<_>>());
        assert!(bills.iter().all(|b| !b.is_paid && !b.is_created()));
    }

    #[tokio::test]
    async fn test_fetch_all_reads_concurrently() {
        let (chain, gateway) = setup().await;
        let latency = Duration::from_millis(50);
        for month in MONTHS {
            chain.set_read_latency(month, latency).await;
        }

        let mut repo = BillRepository::new();
        let started = Instant::now();
        repo.fetch_all(&gateway).await.unwrap();
        let elapsed = started.elapsed();

        // Twelve sequential reads would take at least 12 * latency.
        assert!(elapsed >= latency);
        assert!(elapsed < latency * 4, "fetch took {elapsed:?}");
    }

    #[tokio::test]
    async fn test_single_failure_keeps_previous_list() {
        let (chain, gateway) = setup().await;
        gateway
            .create_bill(NewBill {
                month: 2,
                electricity_cost: TokenAmount::from(1u128),
                water_cost: TokenAmount::from(1u128),
                internet_cost: TokenAmount::from(1u128),
            })
            .await
            .unwrap();

        let mut repo = BillRepository::new();
        repo.fetch_all(&gateway).await.unwrap();
        let before = repo.bills().to_vec();

        chain.reject(CallKind::GetBill(9), "node unreachable").await;
        let err = repo.fetch_all(&gateway).await.unwrap_err();

        assert_eq!(err.to_string(), "node unreachable");
        assert_eq!(repo.bills(), before.as_slice());
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let (_chain, gateway) = setup().await;
        let mut repo = BillRepository::new();

        let first = repo.fetch_all(&gateway).await.unwrap().to_vec();
        let second = repo.fetch_all(&gateway).await.unwrap().to_vec();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_by_position_is_one_based() {
        let (_chain, gateway) = setup().await;
        let mut repo = BillRepository::new();
        repo.fetch_all(&gateway).await.unwrap();

        assert_eq!(repo.by_position(1).map(|b| b.month), Some(1));
        assert_eq!(repo.by_position(12).map(|b| b.month), Some(12));
        assert!(repo.by_position(0).is_none());
        assert!(repo.by_position(13).is_none());
    }
}
