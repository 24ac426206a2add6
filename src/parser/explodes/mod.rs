pub mod common;
pub mod hysteria2;
pub mod ss;
pub mod ssr;
pub mod transport;
pub mod vless;
pub mod vmess;

pub use common::explode;
