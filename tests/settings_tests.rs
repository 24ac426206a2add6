use std::io::Write;

use nodeweave::settings::{Settings, SettingsError};
use tempfile::NamedTempFile;

#[cfg(test)]
mod settings_tests {
    use super::*;

    fn write_settings(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_settings_file() {
        let file = write_settings(
            r#"
clash:
  port: 7000
  socks_port: 7001
  allow_lan: false
  mode: Global
  external_controller: 0.0.0.0:9999
  rules:
    - MATCH,FREE-PROXY
  proxy-groups:
    - name: Streaming
      type: select
      proxies: [DIRECT]
output:
  directory: /tmp/clash
  clash_config_file: free.yaml
naming:
  max-length: 32
"#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.clash.port, 7000);
        assert_eq!(settings.clash.socks_port, 7001);
        assert!(!settings.clash.allow_lan);
        assert_eq!(settings.clash.mode, "Global");
        assert_eq!(settings.clash.external_controller, "0.0.0.0:9999");
        assert_eq!(settings.clash.rules, vec!["MATCH,FREE-PROXY"]);
        assert_eq!(settings.clash.proxy_groups.len(), 1);
        // untouched keys keep their defaults
        assert_eq!(settings.clash.log_level, "info");
        assert_eq!(settings.clash.dns["enable"].as_bool(), Some(true));
        assert_eq!(settings.naming.max_length, 32);
        assert_eq!(
            settings.output_path(),
            std::path::Path::new("/tmp/clash").join("free.yaml")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = Settings::load(&missing).unwrap_err();
        assert!(matches!(err, SettingsError::NotFound(path) if path == missing));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let file = write_settings("clash:\n  port: [unterminated\n");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Yaml(_)));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let file = write_settings("");
        assert_eq!(Settings::load(file.path()).unwrap(), Settings::default());
    }

    #[test]
    fn test_passthrough_keys_reach_base_document() {
        let settings = Settings::from_yaml_str(
            r#"
clash:
  ipv6: false
  profile:
    store-selected: true
"#,
        )
        .unwrap();
        let doc = settings.clash.base_document();
        assert_eq!(doc["ipv6"].as_bool(), Some(false));
        assert_eq!(doc["profile"]["store-selected"].as_bool(), Some(true));
        assert_eq!(doc["port"].as_u64(), Some(7890));
    }
}
