//! Pull proxy links out of raw subscription text.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::url_safe_base64_decode;

lazy_static! {
    static ref LINK_PREFIX: Regex =
        Regex::new(r"(ssr|vmess|vless|ss|hysteria2|hy2|trojan)://").unwrap();
}

/// Extract every proxy link from a block of text.
///
/// Subscription bodies are often a single base64 blob; when the whole text
/// (whitespace removed) decodes to UTF-8 containing links, the decoded text is
/// scanned instead of the raw one. Exact duplicates are dropped, first
/// occurrence wins.
pub fn extract_links(text: &str) -> Vec<String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let decoded = if compact.is_empty() {
        None
    } else {
        url_safe_base64_decode(&compact)
            .ok()
            .filter(|d| d.contains("://"))
    };
    let source = decoded.as_deref().unwrap_or(text);

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for line in source.lines() {
        for link in scan_line(line) {
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
    }
    links
}

/// Cut a line into links.
///
/// A link starts at a known prefix and runs to whitespace or the next prefix.
/// Outside a link, a prefix glued to a preceding word (`xss://`) is ignored;
/// inside one, every prefix starts a new link so that concatenated links
/// split apart.
fn scan_line(line: &str) -> Vec<String> {
    let mut starts: Vec<(usize, usize)> = Vec::new();
    // end of the whitespace-free run the last accepted link lives in
    let mut open_until = 0;
    for m in LINK_PREFIX.find_iter(line) {
        let glued = line[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        let inside_link = !starts.is_empty() && m.start() < open_until;
        if glued && !inside_link {
            continue;
        }
        starts.push((m.start(), m.end()));
        open_until = line[m.end()..]
            .find(char::is_whitespace)
            .map(|pos| m.end() + pos)
            .unwrap_or(line.len());
    }

    let mut links = Vec::with_capacity(starts.len());
    for (i, &(start, prefix_end)) in starts.iter().enumerate() {
        let limit = starts
            .get(i + 1)
            .map(|&(next, _)| next)
            .unwrap_or(line.len());
        let end = line[prefix_end..limit]
            .find(char::is_whitespace)
            .map(|pos| prefix_end + pos)
            .unwrap_or(limit);
        if end > prefix_end {
            links.push(line[start..end].to_string());
        }
    }
    links
}
