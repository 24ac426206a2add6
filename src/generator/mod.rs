pub mod config;
pub mod exports;
pub mod yaml;

// Re-export the pieces of a conversion pass
pub use config::group::{assemble_groups, AGGREGATE_GROUP, LATENCY_GROUP};
pub use config::identity::identity_key;
pub use config::remark::{normalize_name, source_group_name, NameCounters};
pub use exports::clash::{merge, proxy_to_clash, to_yaml_string};
pub use yaml::clash::ClashProxy;
