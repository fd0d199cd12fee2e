//! Core wallet logic.
//!
//! This module provides:
//! - [`chain`] - chain ids, registry, default-chain and RPC map resolution
//! - [`resolver`] - validated startup [`ConnectorConfig`]
//! - [`connector`] - wallet transports behind a uniform activate operation
//! - [`session`] - the connect / switch / restore flow
//! - [`storage`] - last-used connector bookkeeping

pub mod chain;
pub mod connector;
pub mod error;
pub mod resolver;
pub mod session;
pub mod storage;

pub use resolver::{ConnectorConfig, Environment};
