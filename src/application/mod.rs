//! Application layer: the wallet session, contract access, the bill cache and the orchestrator
//! that ties them to user actions.
//!
//! `BillPayApp` is the single owner of run-time state. Everything runs on one task; the only
//! concurrency is the twelve-way bill read inside `BillRepository::fetch_all`.

pub mod app;
pub mod gateway;
pub mod notifier;
pub mod repository;
pub mod session;
