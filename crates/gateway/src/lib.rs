#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod rows;
pub mod source;

pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use source::{InMemorySource, MetricsSource};
