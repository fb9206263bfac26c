//! Infrastructure layer: configuration, logging, signing, remote gateways and journal sinks.

pub mod config;
pub mod gateway;
pub mod journal;
pub mod logging;
pub mod wallet;
