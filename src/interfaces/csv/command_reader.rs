use crate::error::{BillPayError, Result};
use crate::interfaces::form::{BillForm, trailing_id};
use crate::interfaces::view::pay_element_id;
use serde::Deserialize;
use std::io::Read;

/// What a script row does, named after the UI gesture it stands for.
#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Pay,
    Refresh,
}

/// One scripted user action: `action, month, electricity, water, internet`.
///
/// `pay` only needs the month and `refresh` needs nothing.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Command {
    pub action: Action,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub electricity: Option<String>,
    #[serde(default)]
    pub water: Option<String>,
    #[serde(default)]
    pub internet: Option<String>,
}

impl Command {
    /// The form a `create` row fills in. Missing cells stay empty.
    pub fn to_form(&self) -> BillForm {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        BillForm::new(
            field(&self.month),
            field(&self.electricity),
            field(&self.water),
            field(&self.internet),
        )
    }

    /// The id of the pay button a `pay` row clicks.
    pub fn pay_target(&self) -> String {
        let month = self.month.as_deref().unwrap_or_default();
        match trailing_id(month) {
            Ok(month) => pay_element_id(month as u64),
            Err(_) => month.to_string(),
        }
    }
}

/// Reads scripted user actions from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths, so short `pay` and
/// `refresh` rows are accepted.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` over a CSV source with a header row.
    ///
    /// # Arguments
    ///
    /// * `source` - Anything implementing `Read`, e.g. an open script file.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes commands; a bad row yields an error and reading goes on.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BillPayError::from))
    }
}
