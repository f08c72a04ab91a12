//! User input: the bill-creation form and pay-action clicks.

use crate::domain::amount::TokenAmount;
use crate::domain::bill::NewBill;
use crate::error::{BillPayError, Result};

/// The four fields of the bill-creation form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillForm {
    pub month: String,
    pub electricity_cost: String,
    pub water_cost: String,
    pub internet_cost: String,
}

impl BillForm {
    /// Fills the form as a user would type it.
    pub fn new(
        month: impl Into<String>,
        electricity_cost: impl Into<String>,
        water_cost: impl Into<String>,
        internet_cost: impl Into<String>,
    ) -> Self {
        Self {
            month: month.into(),
            electricity_cost: electricity_cost.into(),
            water_cost: water_cost.into(),
            internet_cost: internet_cost.into(),
        }
    }

    /// Converts the typed values into `createBill` arguments, scaling costs to the smallest unit.
    ///
    /// Only the conversion itself can fail here; whether the month is in range is up to the
    /// ledger.
    pub fn to_new_bill(&self, decimals: u32) -> Result<NewBill> {
        let month = self
            .month
            .trim()
            .parse::<u64>()
            .map_err(|_| BillPayError::InvalidMonth(self.month.clone()))?;

        Ok(NewBill {
            month,
            electricity_cost: TokenAmount::from_display(&self.electricity_cost, decimals)?,
            water_cost: TokenAmount::from_display(&self.water_cost, decimals)?,
            internet_cost: TokenAmount::from_display(&self.internet_cost, decimals)?,
        })
    }
}

/// Reads the trailing number of a clicked element's id, e.g. `pay-7` gives 7.
pub fn trailing_id(element_id: &str) -> Result<usize> {
    let prefix = element_id.trim_end_matches(|c: char| c.is_ascii_digit());
    element_id[prefix.len()..]
        .parse()
        .map_err(|_| BillPayError::UnknownBill(element_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::TOKEN_DECIMALS;

    #[test]
    fn test_form_scales_costs() {
        let form = BillForm::new("3", "10.5", "2", "1.25");
        let bill = form.to_new_bill(TOKEN_DECIMALS).unwrap();

        assert_eq!(bill.month, 3);
        assert_eq!(bill.electricity_cost.to_string(), "10500000000000000000");
        assert_eq!(bill.water_cost.to_string(), "2000000000000000000");
        assert_eq!(bill.internet_cost.to_string(), "1250000000000000000");
    }

    #[test]
    fn test_form_passes_out_of_range_month() {
        let bill = BillForm::new("13", "1", "1", "1")
            .to_new_bill(TOKEN_DECIMALS)
            .unwrap();
        assert_eq!(bill.month, 13);
    }

    #[test]
    fn test_form_rejects_unparseable_values() {
        assert!(matches!(
            BillForm::new("march", "1", "1", "1").to_new_bill(TOKEN_DECIMALS),
            Err(BillPayError::InvalidMonth(_))
        ));
        assert!(matches!(
            BillForm::new("3", "1", "lots", "1").to_new_bill(TOKEN_DECIMALS),
            Err(BillPayError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_trailing_id() {
        assert_eq!(trailing_id("pay-7").unwrap(), 7);
        assert_eq!(trailing_id("12").unwrap(), 12);
        assert_eq!(trailing_id("bill10").unwrap(), 10);
        assert!(matches!(
            trailing_id("pay-"),
            Err(BillPayError::UnknownBill(_))
        ));
        assert!(trailing_id("").is_err());
    }
}
