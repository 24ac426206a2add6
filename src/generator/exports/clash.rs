use log::{debug, info};
use serde_yaml::{Mapping, Sequence, Value as YamlValue};

use crate::generator::config::group::assemble_groups;
use crate::generator::yaml::clash::ClashProxy;
use crate::models::{AcceptedNodes, ProxyRecord};
use crate::parser::ConvertError;

const PROXIES_KEY: &str = "proxies";
const PROXY_GROUPS_KEY: &str = "proxy-groups";

/// Convert accepted nodes into a Clash configuration built on `base`.
///
/// The managed proxy groups are assembled from the `proxy-groups` already in
/// `base`; see [`merge`] for how the document itself is put together.
pub fn proxy_to_clash(base: &Mapping, nodes: &AcceptedNodes) -> Result<Mapping, ConvertError> {
    let groups = if nodes.is_empty() {
        Vec::new()
    } else {
        let existing = base_groups(base);
        assemble_groups(&existing, &nodes.names(), nodes.by_source())
    };
    merge(base, nodes.proxies(), groups)
}

/// Build the final document.
///
/// Every key of `base` is copied in order. `proxies` is replaced by the
/// rendered records and `proxy-groups` by `groups`, except when there are no
/// records: then `proxy-groups` stays exactly as in `base`.
pub fn merge(
    base: &Mapping,
    proxies: &[ProxyRecord],
    groups: Vec<YamlValue>,
) -> Result<Mapping, ConvertError> {
    let mut document = base.clone();

    let mut rendered = Sequence::with_capacity(proxies.len());
    for record in proxies {
        let value = serde_yaml::to_value(ClashProxy::from(record))
            .map_err(|e| ConvertError::Render(format!("{}: {}", record.name, e)))?;
        rendered.push(value);
    }
    document.insert(PROXIES_KEY.into(), YamlValue::Sequence(rendered));

    if proxies.is_empty() {
        debug!("No proxies, leaving proxy-groups untouched");
    } else {
        info!(
            "Merged {} proxies and {} proxy groups",
            proxies.len(),
            groups.len()
        );
        document.insert(PROXY_GROUPS_KEY.into(), YamlValue::Sequence(groups));
    }

    Ok(document)
}

/// Serialize a finished document.
pub fn to_yaml_string(document: &Mapping) -> Result<String, ConvertError> {
    serde_yaml::to_string(document).map_err(|e| ConvertError::Render(e.to_string()))
}

fn base_groups(base: &Mapping) -> Sequence {
    match base.get(PROXY_GROUPS_KEY) {
        Some(YamlValue::Sequence(seq)) => seq.clone(),
        _ => Sequence::new(),
    }
}
