//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use nodeweave::models::{ProxyKind, ProxyRecord, ProxyType, ShadowsocksOptions};
//!
//! let record = ProxyRecord::new(
//!     "Tokyo 01",
//!     "1.2.3.4",
//!     8388,
//!     ProxyKind::Shadowsocks(ShadowsocksOptions {
//!         cipher: "aes-256-gcm".to_string(),
//!         password: "secret".to_string(),
//!     }),
//! );
//! assert_eq!(record.proxy_type(), ProxyType::Shadowsocks);
//! ```

pub mod nodes;
pub mod proxy;
pub mod proxy_group_config;

pub use nodes::*;
pub use proxy::*;
pub use proxy_group_config::*;
