pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

// Re-export the main proxy types for easier access
pub use models::{Descriptor, ProxyKind, ProxyRecord, ProxyType};

// Re-export the conversion entry points
pub use interfaces::{convert, ConversionResult, ConverterConfig, ConverterConfigBuilder};
pub use parser::{ConvertError, DecodeError};
pub use settings::{Settings, SettingsError};
