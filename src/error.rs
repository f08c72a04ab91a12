use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillPayError {
    #[error("Please install the CeloExtensionWallet")]
    WalletUnavailable,
    #[error("{0}")]
    WalletError(String),
    /// A failed call or transaction. The message comes from the remote side and is kept verbatim.
    #[error("{0}")]
    TransactionError(String),
    #[error("wallet session is not established")]
    NotConnected,
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("invalid month '{0}'")]
    InvalidMonth(String),
    #[error("no bill matches pay action '{0}'")]
    UnknownBill(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BillPayError>;
