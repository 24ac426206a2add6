use serde_yaml::{Mapping, Value};

/// Type of proxy group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyGroupType {
    Select,
    URLTest,
}

impl ProxyGroupType {
    /// Get string representation of the proxy group type
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyGroupType::Select => "select",
            ProxyGroupType::URLTest => "url-test",
        }
    }
}

/// Configuration for a proxy group this crate creates
#[derive(Debug, Clone)]
pub struct ProxyGroupConfig {
    /// Name of the proxy group
    pub name: String,
    /// Type of the proxy group
    pub group_type: ProxyGroupType,
    /// List of proxy names in this group
    pub proxies: Vec<String>,
    /// URL for testing
    pub url: String,
    /// Interval in seconds between tests
    pub interval: u32,
    /// Tolerance value for tests
    pub tolerance: u32,
}

impl ProxyGroupConfig {
    /// Create a new `select` group
    pub fn select(name: impl Into<String>, proxies: Vec<String>) -> Self {
        Self {
            name: name.into(),
            group_type: ProxyGroupType::Select,
            proxies,
            url: String::new(),
            interval: 0,
            tolerance: 0,
        }
    }

    /// Create a new `url-test` group probing `url` every `interval` seconds
    pub fn url_test(
        name: impl Into<String>,
        proxies: Vec<String>,
        url: impl Into<String>,
        interval: u32,
        tolerance: u32,
    ) -> Self {
        Self {
            name: name.into(),
            group_type: ProxyGroupType::URLTest,
            proxies,
            url: url.into(),
            interval,
            tolerance,
        }
    }

    /// Get string representation of the group type
    pub fn type_str(&self) -> &'static str {
        self.group_type.as_str()
    }

    /// Render the group as a Clash `proxy-groups` entry
    pub fn to_yaml(&self) -> Value {
        let mut map = Mapping::new();
        map.insert("name".into(), self.name.clone().into());
        map.insert("type".into(), self.type_str().into());
        if self.group_type == ProxyGroupType::URLTest {
            map.insert("url".into(), self.url.clone().into());
            map.insert("interval".into(), self.interval.into());
            map.insert("tolerance".into(), self.tolerance.into());
        }
        map.insert("proxies".into(), names_to_yaml(&self.proxies));
        Value::Mapping(map)
    }
}

/// A list of names as a YAML sequence.
pub fn names_to_yaml(names: &[String]) -> Value {
    Value::Sequence(names.iter().cloned().map(Value::String).collect())
}
