pub mod clash;

#[cfg(test)]
mod tests {
    use super::clash::ClashProxy;
    use crate::parser::explode;

    fn render(link: &str) -> String {
        let record = explode(link).unwrap();
        serde_yaml::to_string(&ClashProxy::from(&record)).unwrap()
    }

    #[test]
    fn test_ss_entry() {
        let yaml = render("ss://YWVzLTI1Ni1nY206cEBzcw@1.2.3.4:8388#Tokyo");
        assert_eq!(
            yaml,
            "type: ss\nname: Tokyo\nserver: 1.2.3.4\nport: 8388\nudp: true\ncipher: aes-256-gcm\npassword: p@ss\n"
        );
    }

    #[test]
    fn test_vless_reality_entry() {
        let yaml = render(
            "vless://id@1.2.3.4:443?security=reality&pbk=ABC&sid=01&fp=chrome&sni=www.microsoft.com&flow=xtls-rprx-vision#R",
        );
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value["type"].as_str(), Some("vless"));
        assert_eq!(value["tls"].as_bool(), Some(true));
        assert_eq!(value["skip-cert-verify"].as_bool(), Some(true));
        assert_eq!(value["servername"].as_str(), Some("www.microsoft.com"));
        assert_eq!(value["flow"].as_str(), Some("xtls-rprx-vision"));
        assert_eq!(value["network"].as_str(), Some("tcp"));
        assert_eq!(value["reality-opts"]["public-key"].as_str(), Some("ABC"));
        assert_eq!(value["reality-opts"]["short-id"].as_str(), Some("01"));
        assert_eq!(value["client-fingerprint"].as_str(), Some("chrome"));
        assert!(value.get("ws-opts").is_none());
    }

    #[test]
    fn test_vless_xhttp_entry() {
        let yaml = render("vless://id@h.example.com:443?type=xhttp&host=cdn.example.com");
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value["network"].as_str(), Some("http"));
        assert_eq!(value["http-opts"]["method"].as_str(), Some("GET"));
        assert_eq!(value["http-opts"]["path"][0].as_str(), Some("/"));
        assert_eq!(
            value["http-opts"]["headers"]["Host"][0].as_str(),
            Some("cdn.example.com")
        );
    }

    #[test]
    fn test_ssr_entry_params() {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let password = STANDARD.encode("pw");
        let obfs_param = STANDARD.encode("cdn.example.com");
        let body = format!(
            "1.2.3.4:443:auth_aes128_md5:aes-256-cfb:tls1.2_ticket_auth:{}/?obfsparam={}",
            password, obfs_param
        );
        let yaml = render(&format!("ssr://{}", STANDARD.encode(body)));
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value["type"].as_str(), Some("ssr"));
        assert_eq!(value["udp"].as_bool(), Some(true));
        assert_eq!(value["obfs-param"].as_str(), Some("cdn.example.com"));
        assert!(value.get("protocol-param").is_none());
    }

    #[test]
    fn test_hysteria2_entry() {
        let yaml = render("hy2://pw@h.example.com:443?insecure=1&up=30&down=100.5&obfs=salamander&obfs-password=x");
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value["type"].as_str(), Some("hysteria2"));
        assert_eq!(value["skip-cert-verify"].as_bool(), Some(true));
        assert_eq!(value["up"].as_str(), Some("30 Mbps"));
        assert_eq!(value["down"].as_str(), Some("100.5 Mbps"));
        assert_eq!(value["obfs-password"].as_str(), Some("x"));
    }

    #[test]
    fn test_vmess_ws_entry() {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let json = r#"{"v":"2","ps":"VM","add":"v.example.com","port":"443","id":"uuid-1","aid":"0","net":"ws","path":"/ray","host":"cdn.example.com","tls":"true"}"#;
        let yaml = render(&format!("vmess://{}", STANDARD.encode(json)));
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value["alterId"].as_u64(), Some(0));
        assert_eq!(value["network"].as_str(), Some("ws"));
        assert_eq!(value["ws-opts"]["path"].as_str(), Some("/ray"));
        assert_eq!(
            value["ws-opts"]["headers"]["Host"].as_str(),
            Some("cdn.example.com")
        );
    }
}
