//! Domain layer for tn-host: configuration of the host process itself.

pub mod config;

pub use config::{HostConfig, HostConfigError};
