use log::info;
use serde_yaml::Mapping;

use crate::generator::exports::clash::{proxy_to_clash, to_yaml_string};
use crate::models::Descriptor;
use crate::parser::{collect_nodes, extract_links, ConversionStats, ConvertError};
use crate::settings::Settings;

/// Input of one conversion run
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    /// Links with the label of the page they came from, in arrival order
    pub descriptors: Vec<Descriptor>,
    /// Settings with defaults resolved
    pub settings: Settings,
}

/// Builder for ConverterConfig
#[derive(Debug, Clone, Default)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    /// Create a new default builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these settings instead of the defaults
    pub fn settings(mut self, settings: Settings) -> Self {
        self.config.settings = settings;
        self
    }

    /// Add a single link found on `source`
    pub fn add_link(mut self, link: impl Into<String>, source: impl Into<String>) -> Self {
        self.config
            .descriptors
            .push(Descriptor::new(link, source));
        self
    }

    /// Add every link found in a block of text fetched from `source`
    pub fn add_text(mut self, text: &str, source: &str) -> Self {
        let links = extract_links(text);
        info!("Found {} links in {}", links.len(), source);
        self.config
            .descriptors
            .extend(links.into_iter().map(|link| Descriptor::new(link, source)));
        self
    }

    /// Add already paired descriptors
    pub fn descriptors(mut self, descriptors: Vec<Descriptor>) -> Self {
        self.config.descriptors.extend(descriptors);
        self
    }

    pub fn build(self) -> ConverterConfig {
        self.config
    }
}

/// Output of a successful run
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The finished Clash document
    pub document: Mapping,
    /// The document as YAML
    pub content: String,
    pub stats: ConversionStats,
}

/// Run a full conversion: decode, deduplicate, name, group and merge.
pub fn convert(config: ConverterConfig) -> Result<ConversionResult, ConvertError> {
    info!(
        "Converting {} links into a Clash configuration",
        config.descriptors.len()
    );

    let conversion = collect_nodes(&config.descriptors, &config.settings.naming)?;
    let base = config.settings.clash.base_document();
    let document = proxy_to_clash(&base, &conversion.nodes)?;
    let content = to_yaml_string(&document)?;

    Ok(ConversionResult {
        document,
        content,
        stats: conversion.stats,
    })
}
