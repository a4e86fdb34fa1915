//! Scripts for deploying the VEGA Bio-PoS smart contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod reporter;
pub mod types;
pub mod utils;
pub mod verify;
