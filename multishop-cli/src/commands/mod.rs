//! Command implementations for the multishop CLI

pub mod serve;

pub use serve::run_serve;
