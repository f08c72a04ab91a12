use super::amount::TokenAmount;
use alloy_primitives::Address;
use std::ops::RangeInclusive;

/// The fixed ledger index space: one bill slot per calendar month.
pub const MONTHS: RangeInclusive<u64> = 1..=12;

/// One month's utility charge as recorded by the ledger contract.
///
/// An index that was never created reads back as the default record: zero owner, zero costs,
/// unpaid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bill {
    /// The ledger key, 1 through 12.
    pub month: u64,
    /// The account that created the bill.
    pub owner: Address,
    pub electricity_cost: TokenAmount,
    pub water_cost: TokenAmount,
    pub internet_cost: TokenAmount,
    /// Computed and stored by the ledger; never recomputed here.
    pub total: TokenAmount,
    pub is_paid: bool,
}

impl Bill {
    /// A never-created slot.
    pub fn empty(month: u64) -> Self {
        Self {
            month,
            ..Self::default()
        }
    }

    pub fn is_created(&self) -> bool {
        self.owner != Address::ZERO
    }
}

/// Arguments of a `createBill` transaction, already scaled to the smallest unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBill {
    pub month: u64,
    pub electricity_cost: TokenAmount,
    pub water_cost: TokenAmount,
    pub internet_cost: TokenAmount,
}
