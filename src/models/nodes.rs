//! Batch-level containers: raw descriptors going in, accepted nodes coming out.

use std::collections::HashSet;

use linked_hash_map::LinkedHashMap;

use super::ProxyRecord;

/// A raw link together with the label of the page it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub link: String,
    pub source: String,
}

impl Descriptor {
    pub fn new(link: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            source: source.into(),
        }
    }
}

/// Nodes admitted during one conversion pass, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct AcceptedNodes {
    proxies: Vec<ProxyRecord>,
    /// source group name -> display names, in order of first appearance
    by_source: LinkedHashMap<String, Vec<String>>,
    keys: HashSet<String>,
}

impl AcceptedNodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a node with this identity key was already admitted.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Admit a record whose display name is final.
    ///
    /// Returns `false` and leaves the set untouched when the key is already
    /// present.
    pub fn admit(&mut self, key: String, record: ProxyRecord, source_group: &str) -> bool {
        if !self.keys.insert(key) {
            return false;
        }
        self.by_source
            .entry(source_group.to_string())
            .or_insert_with(Vec::new)
            .push(record.name.clone());
        self.proxies.push(record);
        true
    }

    pub fn proxies(&self) -> &[ProxyRecord] {
        &self.proxies
    }

    pub fn by_source(&self) -> &LinkedHashMap<String, Vec<String>> {
        &self.by_source
    }

    pub fn names(&self) -> Vec<String> {
        self.proxies.iter().map(|p| p.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
