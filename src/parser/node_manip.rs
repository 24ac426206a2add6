//! One conversion pass over a batch of links.

use log::{debug, info, warn};

use crate::generator::config::identity::identity_key;
use crate::generator::config::remark::{normalize_name, source_group_name, NameCounters};
use crate::models::{AcceptedNodes, Descriptor};
use crate::parser::explodes::explode;
use crate::parser::ConvertError;
use crate::settings::NamingSettings;
use crate::utils::truncate_chars;

/// Characters of a failing link shown in the log.
const LOG_PREVIEW_CHARS: usize = 50;

/// Counters describing how a batch went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub total: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub failed: usize,
}

/// Result of a successful pass.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    pub nodes: AcceptedNodes,
    pub stats: ConversionStats,
}

/// Decode, deduplicate and name every descriptor, in input order.
///
/// A link that fails to decode is logged and skipped. The first link with a
/// given identity key wins and is credited to its own source; later ones are
/// counted as duplicates and never consume a name.
///
/// # Errors
///
/// * [`ConvertError::EmptyInputBatch`] when `descriptors` is empty
/// * [`ConvertError::NoRecordsAccepted`] when nothing survived
pub fn collect_nodes(
    descriptors: &[Descriptor],
    naming: &NamingSettings,
) -> Result<Conversion, ConvertError> {
    if descriptors.is_empty() {
        return Err(ConvertError::EmptyInputBatch);
    }

    let mut nodes = AcceptedNodes::new();
    let mut counters = NameCounters::new();
    let mut stats = ConversionStats {
        total: descriptors.len(),
        ..Default::default()
    };

    for descriptor in descriptors {
        let mut record = match explode(&descriptor.link) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "Failed to convert node {}...: {}",
                    truncate_chars(descriptor.link.trim(), LOG_PREVIEW_CHARS),
                    e
                );
                stats.failed += 1;
                continue;
            }
        };

        let key = identity_key(&record);
        if nodes.contains_key(&key) {
            debug!("Skipping duplicate node: {}", record.name);
            stats.duplicates += 1;
            continue;
        }

        let group = source_group_name(&descriptor.source);
        // An unlabeled source still gets a group but no name suffix
        let suffix = if descriptor.source.trim().is_empty() {
            ""
        } else {
            group.as_str()
        };
        record.name = normalize_name(
            &record.name,
            suffix,
            &naming.regions,
            &mut counters,
            naming.max_length,
        );
        info!(
            "Added node: {} (source: {})",
            record.name, descriptor.source
        );
        nodes.admit(key, record, &group);
        stats.accepted += 1;
    }

    info!(
        "Converted {} unique nodes from {} links ({} duplicates, {} failed)",
        stats.accepted, stats.total, stats.duplicates, stats.failed
    );

    if nodes.is_empty() {
        return Err(ConvertError::NoRecordsAccepted {
            failed: stats.failed,
            duplicates: stats.duplicates,
        });
    }

    Ok(Conversion { nodes, stats })
}
