//! Group generation utilities
//!
//! Maintains the proxy groups this crate owns inside a Clash `proxy-groups`
//! list while leaving every other group where it was.

use linked_hash_map::LinkedHashMap;
use log::warn;
use serde_yaml::Value;

use crate::models::{names_to_yaml, ProxyGroupConfig};

/// Selector exposing every source group and node.
pub const AGGREGATE_GROUP: &str = "FREE-PROXY";
/// Latency-tested group over every node.
pub const LATENCY_GROUP: &str = "AUTO-SWITCH";

pub const LATENCY_TEST_URL: &str = "http://www.gstatic.com/generate_204";
pub const LATENCY_TEST_INTERVAL: u32 = 300;
pub const LATENCY_TEST_TOLERANCE: u32 = 50;

/// Update `existing` with the managed groups for this run.
///
/// # Arguments
///
/// * `existing` - `proxy-groups` from the base configuration
/// * `names` - Display names of all accepted nodes, in acceptance order
/// * `by_source` - Source group name to the display names it contributed
///
/// # Returns
///
/// The new `proxy-groups` list. Groups with names this crate does not manage
/// keep their content and position.
pub fn assemble_groups(
    existing: &[Value],
    names: &[String],
    by_source: &LinkedHashMap<String, Vec<String>>,
) -> Vec<Value> {
    let mut groups = existing.to_vec();

    match find_group(&groups, LATENCY_GROUP) {
        Some(idx) => set_members(&mut groups[idx], names),
        None => groups.push(
            ProxyGroupConfig::url_test(
                LATENCY_GROUP,
                names.to_vec(),
                LATENCY_TEST_URL,
                LATENCY_TEST_INTERVAL,
                LATENCY_TEST_TOLERANCE,
            )
            .to_yaml(),
        ),
    }

    let seed = vec![LATENCY_GROUP.to_string()];
    match find_group(&groups, AGGREGATE_GROUP) {
        Some(idx) => set_members(&mut groups[idx], &seed),
        None => groups.insert(
            0,
            ProxyGroupConfig::select(AGGREGATE_GROUP, seed.clone()).to_yaml(),
        ),
    }

    let mut source_groups = Vec::with_capacity(by_source.len());
    for (group_name, members) in by_source.iter() {
        if is_managed(group_name) {
            warn!(
                "Source group name '{}' clashes with a built-in group, skipped",
                group_name
            );
            continue;
        }
        match find_group(&groups, group_name) {
            Some(idx) => set_members(&mut groups[idx], members),
            None => groups.push(
                ProxyGroupConfig::select(group_name.clone(), members.clone()).to_yaml(),
            ),
        }
        source_groups.push(group_name.clone());
    }

    if let Some(idx) = find_group(&groups, AGGREGATE_GROUP) {
        let mut members = seed;
        for name in source_groups.iter().chain(names.iter()) {
            if !members.contains(name) {
                members.push(name.clone());
            }
        }
        set_members(&mut groups[idx], &members);
    }

    groups
}

/// Whether `name` is one of the groups this crate always rebuilds.
pub fn is_managed(name: &str) -> bool {
    name == AGGREGATE_GROUP || name == LATENCY_GROUP
}

/// Name of a `proxy-groups` entry, if it has one.
pub fn group_name(group: &Value) -> Option<&str> {
    group.get("name").and_then(Value::as_str)
}

fn find_group(groups: &[Value], name: &str) -> Option<usize> {
    groups.iter().position(|g| group_name(g) == Some(name))
}

fn set_members(group: &mut Value, members: &[String]) {
    if let Value::Mapping(map) = group {
        map.insert("proxies".into(), names_to_yaml(members));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(group: &Value) -> Vec<String> {
        group["proxies"]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    fn names(groups: &[Value]) -> Vec<&str> {
        groups.iter().filter_map(group_name).collect()
    }

    fn sources(entries: &[(&str, Vec<&str>)]) -> LinkedHashMap<String, Vec<String>> {
        let mut map = LinkedHashMap::new();
        for (group, members) in entries {
            map.insert(
                group.to_string(),
                members.iter().map(|m| m.to_string()).collect(),
            );
        }
        map
    }

    #[test]
    fn test_assemble_from_scratch() {
        let accepted = vec!["a".to_string(), "b".to_string()];
        let by_source = sources(&[("S1", vec!["a"]), ("S2", vec!["b"])]);
        let groups = assemble_groups(&[], &accepted, &by_source);

        assert_eq!(names(&groups), vec![AGGREGATE_GROUP, LATENCY_GROUP, "S1", "S2"]);
        assert_eq!(
            members(&groups[0]),
            vec![LATENCY_GROUP, "S1", "S2", "a", "b"]
        );
        assert_eq!(members(&groups[1]), vec!["a", "b"]);
        assert_eq!(groups[1]["type"].as_str(), Some("url-test"));
        assert_eq!(groups[1]["interval"].as_u64(), Some(300));
        assert_eq!(members(&groups[2]), vec!["a"]);
    }

    #[test]
    fn test_existing_groups_keep_position() {
        let existing: Vec<Value> = serde_yaml::from_str(
            r#"
- name: Streaming
  type: select
  proxies: [DIRECT]
- name: FREE-PROXY
  type: select
  proxies: [stale, DIRECT]
- name: S1
  type: select
  proxies: [old]
"#,
        )
        .unwrap();
        let accepted = vec!["a".to_string()];
        let by_source = sources(&[("S1", vec!["a"])]);
        let groups = assemble_groups(&existing, &accepted, &by_source);

        assert_eq!(
            names(&groups),
            vec!["Streaming", AGGREGATE_GROUP, "S1", LATENCY_GROUP]
        );
        assert_eq!(members(&groups[0]), vec!["DIRECT"]);
        assert_eq!(members(&groups[1]), vec![LATENCY_GROUP, "S1", "a"]);
        assert_eq!(members(&groups[2]), vec!["a"]);
    }

    #[test]
    fn test_existing_latency_group_settings_survive() {
        let existing: Vec<Value> = serde_yaml::from_str(
            r#"
- name: AUTO-SWITCH
  type: url-test
  url: http://cp.cloudflare.com
  interval: 600
  proxies: []
"#,
        )
        .unwrap();
        let accepted = vec!["a".to_string()];
        let groups = assemble_groups(&existing, &accepted, &sources(&[("S1", vec!["a"])]));

        let latency = &groups[find_group(&groups, LATENCY_GROUP).unwrap()];
        assert_eq!(latency["url"].as_str(), Some("http://cp.cloudflare.com"));
        assert_eq!(members(latency), vec!["a"]);
    }

    #[test]
    fn test_aggregate_has_no_duplicates() {
        // a node named like its source group is listed once
        let accepted = vec!["S1".to_string(), "b".to_string()];
        let by_source = sources(&[("S1", vec!["S1", "b"])]);
        let groups = assemble_groups(&[], &accepted, &by_source);
        assert_eq!(members(&groups[0]), vec![LATENCY_GROUP, "S1", "b"]);
    }

    #[test]
    fn test_source_named_like_managed_group_is_skipped() {
        let accepted = vec!["a".to_string()];
        let by_source = sources(&[(AGGREGATE_GROUP, vec!["a"])]);
        let groups = assemble_groups(&[], &accepted, &by_source);
        assert_eq!(names(&groups), vec![AGGREGATE_GROUP, LATENCY_GROUP]);
        assert_eq!(members(&groups[0]), vec![LATENCY_GROUP, "a"]);
    }
}
