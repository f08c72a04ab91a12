//! Adapters that satisfy the domain ports.

pub mod in_memory;
