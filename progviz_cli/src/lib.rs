//! progviz command line interface
//!
//! The binary lives in `main.rs`; the modules are exposed here so the
//! integration tests can drive configuration loading directly.

pub mod config;
pub mod demo;
pub mod error;
pub mod terminal;
