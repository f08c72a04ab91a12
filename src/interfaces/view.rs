//! Turns balance and bill snapshots into what the user sees.

use crate::config::Config;
use crate::domain::amount::TokenAmount;
use crate::domain::bill::Bill;
use alloy_primitives::{Address, keccak256};
use serde::Serialize;
use std::fmt;

const IDENTICON_SIZE: usize = 8;

/// A deterministic picture of an address: an 8x8 grid mirrored around its vertical axis, plus
/// a colour, both derived from the address hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identicon {
    pub color: String,
    pub rows: Vec<String>,
}

impl Identicon {
    pub fn for_address(address: &Address) -> Self {
        let hash = keccak256(address.as_slice());
        let half = IDENTICON_SIZE / 2;

        let rows = hash
            .chunks(half)
            .take(IDENTICON_SIZE)
            .map(|chunk| {
                let left: String = chunk
                    .iter()
                    .map(|byte| if (byte & 0x80) != 0 { '#' } else { '.' })
                    .collect();
                let right: String = left.chars().rev().collect();
                left + &right
            })
            .collect();

        Self {
            color: format!("#{:02x}{:02x}{:02x}", hash[0], hash[1], hash[2]),
            rows,
        }
    }
}

/// The pay button of an unpaid bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayAction {
    pub element_id: String,
    pub label: String,
}

/// One rendered bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillCard {
    pub month: u64,
    pub status: String,
    pub electricity_cost: String,
    pub water_cost: String,
    pub internet_cost: String,
    pub total: String,
    pub owner: String,
    pub owner_url: String,
    pub identicon: Identicon,
    /// Present only while the bill is unpaid.
    pub pay_action: Option<PayAction>,
}

/// The whole display surface: balance field, status banner and bill list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub balance: String,
    pub currency: String,
    pub notification: Option<String>,
    pub bills: Vec<BillCard>,
}

/// Element id of a bill's pay action. The trailing number is what a click resolves.
pub fn pay_element_id(month: u64) -> String {
    format!("pay-{month}")
}

pub fn paid_label(is_paid: bool) -> &'static str {
    if is_paid { "Paid" } else { "Not paid" }
}

/// Renders one bill with amounts scaled down to display units.
pub fn render_bill(bill: &Bill, config: &Config) -> BillCard {
    let display =
        |amount: &TokenAmount| amount.to_display(config.decimals, config.display_precision);
    let total = display(&bill.total);

    BillCard {
        month: bill.month,
        status: paid_label(bill.is_paid).to_string(),
        electricity_cost: display(&bill.electricity_cost),
        water_cost: display(&bill.water_cost),
        internet_cost: display(&bill.internet_cost),
        owner: bill.owner.to_string(),
        owner_url: format!(
            "{}/address/{}/transactions",
            config.explorer_url.trim_end_matches('/'),
            bill.owner
        ),
        identicon: Identicon::for_address(&bill.owner),
        pay_action: (!bill.is_paid).then(|| PayAction {
            element_id: pay_element_id(bill.month),
            label: format!("Pay {} {}", total, config.currency_symbol),
        }),
        total,
    }
}

/// Renders one card per bill, in list order.
///
/// `balance` is `None` until it could be read; it then shows as a dash.
pub fn render_page(
    balance: Option<&TokenAmount>,
    bills: &[Bill],
    notification: Option<&str>,
    config: &Config,
) -> PageView {
    PageView {
        balance: balance
            .map(|b| b.to_display(config.decimals, config.display_precision))
            .unwrap_or_else(|| "-".to_string()),
        currency: config.currency_symbol.clone(),
        notification: notification.map(str::to_string),
        bills: bills.iter().map(|bill| render_bill(bill, config)).collect(),
    }
}

impl fmt::Display for BillCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} month [{}]", self.month, self.status)?;
        writeln!(f, "  Owner: {} ({})", self.owner, self.owner_url)?;
        for row in &self.identicon.rows {
            writeln!(f, "    {row}")?;
        }
        writeln!(f, "  Electricity cost: {}", self.electricity_cost)?;
        writeln!(f, "  Water cost: {}", self.water_cost)?;
        writeln!(f, "  Internet cost: {}", self.internet_cost)?;
        writeln!(f, "  Total: {}", self.total)?;
        if let Some(action) = &self.pay_action {
            writeln!(f, "  [{}] {}", action.element_id, action.label)?;
        }
        Ok(())
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Balance: {} {}", self.balance, self.currency)?;
        if let Some(text) = &self.notification {
            writeln!(f, "Notice: {text}")?;
        }
        for card in &self.bills {
            writeln!(f)?;
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
