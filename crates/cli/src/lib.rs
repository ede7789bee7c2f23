//! `gigledger` binary internals: environment configuration and the
//! JSON-lines command script driver.

pub mod config;
pub mod script;

pub use config::Config;
pub use script::{Output, run_script};
