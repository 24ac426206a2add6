use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// Region codes that get a flag in display names by default.
const DEFAULT_REGION_CODES: &[&str] = &[
    "AR", "AU", "BR", "CA", "CH", "CN", "DE", "ES", "FI", "FR", "GB", "HK", "ID", "IE", "IN",
    "IT", "JP", "KR", "MO", "MY", "NL", "PH", "PL", "RU", "SE", "SG", "TH", "TR", "TW", "UA",
    "US", "VN",
];

/// Base settings for the generated Clash document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClashSettings {
    pub port: u16,
    #[serde(alias = "socks_port")]
    pub socks_port: u16,
    #[serde(alias = "allow_lan")]
    pub allow_lan: bool,
    pub mode: String,
    #[serde(alias = "log_level")]
    pub log_level: String,
    #[serde(alias = "external_controller")]
    pub external_controller: String,
    pub secret: String,
    pub dns: Value,
    #[serde(alias = "rule_providers")]
    pub rule_providers: Value,
    pub rules: Vec<String>,
    #[serde(alias = "proxy_groups")]
    pub proxy_groups: Vec<Value>,
    /// Any other top-level Clash key, copied to the output as is
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Default for ClashSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            socks_port: default_socks_port(),
            allow_lan: true,
            mode: default_mode(),
            log_level: default_log_level(),
            external_controller: default_external_controller(),
            secret: String::new(),
            dns: default_dns(),
            rule_providers: Value::Mapping(Mapping::new()),
            rules: default_rules(),
            proxy_groups: Vec::new(),
            extra: Mapping::new(),
        }
    }
}

/// Where the generated document is written
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputSettings {
    pub directory: String,
    #[serde(alias = "clash_config_file")]
    pub clash_config_file: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: "./output".to_string(),
            clash_config_file: "clash_config.yaml".to_string(),
        }
    }
}

/// Display name rules
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NamingSettings {
    /// Region code -> symbol. Entries from the file extend the built-in table.
    #[serde(deserialize_with = "extend_default_regions")]
    pub regions: HashMap<String, String>,
    #[serde(alias = "max_length")]
    pub max_length: usize,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            max_length: default_max_length(),
        }
    }
}

fn default_port() -> u16 {
    7890
}

fn default_socks_port() -> u16 {
    7891
}

fn default_mode() -> String {
    "Rule".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_external_controller() -> String {
    "127.0.0.1:9090".to_string()
}

fn default_max_length() -> usize {
    50
}

fn default_dns() -> Value {
    let mut dns = Mapping::new();
    dns.insert("enable".into(), true.into());
    dns.insert("listen".into(), "0.0.0.0:53".into());
    dns.insert("enhanced-mode".into(), "fake-ip".into());
    dns.insert(
        "nameserver".into(),
        Value::Sequence(vec!["114.114.114.114".into(), "8.8.8.8".into()]),
    );
    Value::Mapping(dns)
}

fn default_rules() -> Vec<String> {
    [
        "DOMAIN-SUFFIX,google.com,PROXY",
        "DOMAIN-SUFFIX,facebook.com,PROXY",
        "DOMAIN-SUFFIX,youtube.com,PROXY",
        "GEOIP,CN,DIRECT",
        "MATCH,PROXY",
    ]
    .iter()
    .map(|r| r.to_string())
    .collect()
}

/// Built-in region table: each code maps to its flag emoji.
pub fn default_regions() -> HashMap<String, String> {
    DEFAULT_REGION_CODES
        .iter()
        .filter_map(|code| flag_emoji(code).map(|flag| (code.to_string(), flag)))
        .collect()
}

/// The flag of a two-letter region code, built from regional indicator symbols.
fn flag_emoji(code: &str) -> Option<String> {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    code.bytes()
        .map(|b| char::from_u32(0x1F1E6 + u32::from(b - b'A')))
        .collect()
}

fn extend_default_regions<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let extra = Option::<HashMap<String, String>>::deserialize(deserializer)?;
    let mut regions = default_regions();
    regions.extend(extra.unwrap_or_default());
    Ok(regions)
}
