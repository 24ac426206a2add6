pub mod converter;

pub use converter::{convert, ConversionResult, ConverterConfig, ConverterConfigBuilder};
