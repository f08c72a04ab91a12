//! Domain types and the ports through which the client reaches the wallet and contracts.

pub mod amount;
pub mod bill;
pub mod ports;
