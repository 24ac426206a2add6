//! Remark processing utilities
//!
//! Turns the raw label a link carries into the display name written to the
//! configuration, and derives group names from source labels.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::utils::truncate_chars;

/// Group name used when a source label cleans down to nothing.
pub const UNKNOWN_SOURCE: &str = "未知来源";

/// Longest group name derived from a source label.
const MAX_SOURCE_NAME_CHARS: usize = 30;

lazy_static! {
    static ref REGION_PREFIX: Regex =
        Regex::new(r"^([A-Z]{2})([\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}].*)$").unwrap();
    static ref NUMERIC_PREFIX: Regex = Regex::new(r"^\d+ - ").unwrap();
    static ref SCHEME_PREFIX: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").unwrap();
    static ref PORT_SUFFIX: Regex = Regex::new(r":\d+$").unwrap();
}

/// Per-run collision counters for display names.
///
/// One instance lives for exactly one conversion pass.
#[derive(Debug, Default)]
pub struct NameCounters {
    seen: HashMap<String, usize>,
    used: HashSet<String>,
}

impl NameCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unique name for `base`, at most `max_len` characters.
    ///
    /// The first request for a base gets it unchanged, later ones get `1`,
    /// `2`, ... appended directly. When cutting to `max_len` would collide
    /// with a name already handed out, the base is shortened instead so the
    /// suffix survives.
    pub fn next_name(&mut self, base: &str, max_len: usize) -> String {
        loop {
            let seen = self.seen.entry(base.to_string()).or_insert(0);
            let suffix = if *seen == 0 {
                String::new()
            } else {
                seen.to_string()
            };
            *seen += 1;

            let name = truncate_chars(&format!("{}{}", base, suffix), max_len);
            if self.used.insert(name.clone()) {
                return name;
            }

            if !suffix.is_empty() {
                let keep = max_len.saturating_sub(suffix.chars().count());
                let name = format!("{}{}", truncate_chars(base, keep), suffix);
                if self.used.insert(name.clone()) {
                    return name;
                }
            }
        }
    }

    /// Number of distinct names handed out so far.
    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// Build the display name for a node.
///
/// # Arguments
///
/// * `raw` - The label decoded from the link
/// * `source` - Group name of the source the link came from; may be empty
/// * `regions` - Region code to symbol table
/// * `counters` - Collision counters of the current run
/// * `max_len` - Maximum name length in characters
pub fn normalize_name(
    raw: &str,
    source: &str,
    regions: &HashMap<String, String>,
    counters: &mut NameCounters,
    max_len: usize,
) -> String {
    let mut name = raw.trim().to_string();

    // "JP日本 01" -> "🇯🇵日本 01"
    if let Some(caps) = REGION_PREFIX.captures(&name) {
        if let Some(symbol) = regions.get(&caps[1]) {
            name = format!("{}{}", symbol, &caps[2]);
        }
    }

    name = NUMERIC_PREFIX.replace(&name, "").into_owned();

    if !source.is_empty() {
        name = format!("{} - {}", name, source);
    }

    counters.next_name(&name, max_len)
}

/// Derive a proxy group name from the label of the page a link came from.
///
/// GitHub repositories become `Github - user/repo`. Anything else is reduced
/// to its host part with only CJK ideographs, ASCII alphanumerics, `.`, `-`
/// and `_` kept.
pub fn source_group_name(label: &str) -> String {
    let label = label.trim();
    if let Some(name) = github_group_name(label) {
        return name;
    }

    let without_scheme = SCHEME_PREFIX.replace(label, "");
    let host = without_scheme
        .split('/')
        .next()
        .unwrap_or_default();
    let host = PORT_SUFFIX.replace(host, "");

    let cleaned: String = host
        .chars()
        .filter(|c| is_cjk_ideograph(*c) || c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = truncate_chars(&cleaned, MAX_SOURCE_NAME_CHARS);

    if cleaned.is_empty() {
        UNKNOWN_SOURCE.to_string()
    } else {
        cleaned
    }
}

fn github_group_name(label: &str) -> Option<String> {
    let url = Url::parse(label).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str() != Some("github.com") {
        return None;
    }
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let user = segments.next()?;
    let repo = segments.next()?;
    Some(format!("Github - {}/{}", user, repo))
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> HashMap<String, String> {
        HashMap::from([
            ("JP".to_string(), "🇯🇵".to_string()),
            ("US".to_string(), "🇺🇸".to_string()),
        ])
    }

    #[test]
    fn test_region_code_replaced() {
        let mut counters = NameCounters::new();
        let name = normalize_name("JP日本 01", "", &regions(), &mut counters, 50);
        assert_eq!(name, "🇯🇵日本 01");
    }

    #[test]
    fn test_region_code_needs_script_text() {
        let mut counters = NameCounters::new();
        assert_eq!(
            normalize_name("JPTokyo", "", &regions(), &mut counters, 50),
            "JPTokyo"
        );
        // unknown code is left alone
        assert_eq!(
            normalize_name("KR韩国", "", &regions(), &mut counters, 50),
            "KR韩国"
        );
    }

    #[test]
    fn test_numeric_prefix_and_source_suffix() {
        let mut counters = NameCounters::new();
        let name = normalize_name("12 - 香港 HK", "S1", &regions(), &mut counters, 50);
        assert_eq!(name, "香港 HK - S1");
    }

    #[test]
    fn test_numeric_prefix_needs_spaced_dash() {
        let mut counters = NameCounters::new();
        assert_eq!(
            normalize_name("2024-Tokyo", "", &regions(), &mut counters, 50),
            "2024-Tokyo"
        );
        assert_eq!(
            normalize_name("7 - 7 - Osaka", "", &regions(), &mut counters, 50),
            "7 - Osaka"
        );
    }

    #[test]
    fn test_collision_suffixes() {
        let mut counters = NameCounters::new();
        let names: Vec<String> = (0..4)
            .map(|_| normalize_name("Node", "S1", &regions(), &mut counters, 50))
            .collect();
        assert_eq!(
            names,
            vec!["Node - S1", "Node - S11", "Node - S12", "Node - S13"]
        );
        assert_eq!(counters.len(), 4);
    }

    #[test]
    fn test_truncation_keeps_names_unique() {
        let mut counters = NameCounters::new();
        let long = "x".repeat(60);
        let first = normalize_name(&long, "", &regions(), &mut counters, 50);
        let second = normalize_name(&long, "", &regions(), &mut counters, 50);
        assert_eq!(first.chars().count(), 50);
        assert_eq!(second.chars().count(), 50);
        assert_ne!(first, second);
        assert!(second.ends_with('1'));
    }

    #[test]
    fn test_source_group_name_github() {
        assert_eq!(
            source_group_name("https://github.com/alice/free-nodes/wiki/List"),
            "Github - alice/free-nodes"
        );
    }

    #[test]
    fn test_source_group_name_host() {
        assert_eq!(
            source_group_name("https://nodes.example.com:8443/sub?token=1"),
            "nodes.example.com"
        );
        assert_eq!(source_group_name("S1"), "S1");
        assert_eq!(source_group_name("免费节点!"), "免费节点");
        assert_eq!(source_group_name("https://"), UNKNOWN_SOURCE);
        assert_eq!(source_group_name(""), UNKNOWN_SOURCE);
    }

    #[test]
    fn test_source_group_name_length() {
        let label = format!("https://{}.com", "a".repeat(40));
        assert_eq!(source_group_name(&label).chars().count(), 30);
    }
}
