use super::common::default_remark;
use super::transport::build_transport;
use crate::models::{ProxyKind, ProxyRecord, RealityOptions, TlsMode, VlessOptions};
use crate::parser::DecodeError;
use crate::utils::url::{url_decode, AuthorityUrl};
use crate::utils::{split_list, to_bool};

/// Parse the body of a VLESS link (everything after `vless://`)
///
/// Format: `uuid@server:port[/path]?type=ws&security=reality&pbk=...#remark`
pub fn explode_vless(body: &str) -> Result<ProxyRecord, DecodeError> {
    let url = AuthorityUrl::parse(body)?;

    let uuid = url.auth.trim().to_string();
    if uuid.is_empty() {
        return Err(DecodeError::MissingRequiredField("uuid"));
    }

    let network = url
        .non_empty_param("type")
        .or_else(|| url.non_empty_param("net"))
        .unwrap_or("tcp")
        .to_string();

    // tls, reality and xtls all run over TLS, and so does a literal tls=true
    let security = url
        .param("security")
        .map(TlsMode::from_param)
        .unwrap_or_default();
    let tls = security != TlsMode::None
        || url
            .param("tls")
            .is_some_and(|tls| tls.eq_ignore_ascii_case("true"));

    let mut sni = None;
    let mut alpn = Vec::new();
    let mut reality = None;
    if tls {
        sni = url.non_empty_param("sni").map(str::to_string);
        alpn = url
            .non_empty_param("alpn")
            .map(|a| split_list(&url_decode(a)))
            .unwrap_or_default();

        if security == TlsMode::Reality {
            reality = Some(RealityOptions {
                public_key: url.non_empty_param("pbk").map(str::to_string),
                short_id: url.non_empty_param("sid").map(str::to_string),
                fingerprint: url.non_empty_param("fp").map(str::to_string),
            });
        }
    }

    // The URL path wins; many producers put it in a `path` parameter instead
    let path = url
        .path
        .clone()
        .or_else(|| url.non_empty_param("path").map(url_decode));
    let host = url.non_empty_param("host").map(str::to_string);
    let service_name = url.non_empty_param("serviceName").map(url_decode);
    let transport = build_transport(&network, path, host, service_name);

    // A fragment label takes priority over the remarks parameter
    let remark = url
        .fragment
        .clone()
        .or_else(|| url.non_empty_param("remarks").map(url_decode))
        .unwrap_or_else(|| default_remark(&url.host, url.port));

    Ok(ProxyRecord::new(
        remark,
        url.host.clone(),
        url.port,
        ProxyKind::Vless(VlessOptions {
            uuid,
            security,
            tls,
            sni,
            alpn,
            reality,
            flow: url.non_empty_param("flow").map(str::to_string),
            udp: url.param("udp").is_some_and(to_bool),
            transport,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transport;

    fn options(record: &ProxyRecord) -> &VlessOptions {
        match &record.kind {
            ProxyKind::Vless(opts) => opts,
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_explode_vless_reality() {
        let body = "a3482e88-686a-4a58-8126-99c9df64b7bf@1.2.3.4:443?security=reality&pbk=ABC&sid=01&fp=chrome&sni=www.microsoft.com&flow=xtls-rprx-vision&type=tcp#JP%20Reality";
        let node = explode_vless(body).unwrap();
        let opts = options(&node);

        assert_eq!(node.server, "1.2.3.4");
        assert_eq!(node.port, 443);
        assert_eq!(node.name, "JP Reality");
        assert_eq!(opts.security, TlsMode::Reality);
        assert!(opts.tls);
        assert_eq!(opts.sni.as_deref(), Some("www.microsoft.com"));
        assert_eq!(opts.flow.as_deref(), Some("xtls-rprx-vision"));
        assert_eq!(
            opts.reality,
            Some(RealityOptions {
                public_key: Some("ABC".into()),
                short_id: Some("01".into()),
                fingerprint: Some("chrome".into()),
            })
        );
        assert_eq!(opts.transport, Transport::Tcp);
    }

    #[test]
    fn test_explode_vless_ws_path_from_url() {
        let body = "uuid@example.com:443/ws-path?type=ws&security=tls&host=cdn.example.com&alpn=h2%2Chttp%2F1.1";
        let node = explode_vless(body).unwrap();
        let opts = options(&node);

        assert_eq!(
            opts.transport,
            Transport::Ws {
                path: Some("/ws-path".into()),
                host: Some("cdn.example.com".into())
            }
        );
        assert_eq!(opts.alpn, vec!["h2", "http/1.1"]);
        assert_eq!(opts.reality, None);
    }

    #[test]
    fn test_explode_vless_ws_path_from_param() {
        let body = "uuid@example.com:80?type=ws&path=%2Fray";
        let node = explode_vless(body).unwrap();
        let opts = options(&node);

        assert!(!opts.tls);
        assert_eq!(
            opts.transport,
            Transport::Ws {
                path: Some("/ray".into()),
                host: None
            }
        );
    }

    #[test]
    fn test_explode_vless_tls_param_and_sni_only_with_tls() {
        let plain = explode_vless("uuid@example.com:80?sni=x.com").unwrap();
        assert!(!options(&plain).tls);
        assert_eq!(options(&plain).sni, None);

        let forced = explode_vless("uuid@example.com:443?tls=true&sni=x.com").unwrap();
        assert!(options(&forced).tls);
        assert_eq!(options(&forced).security, TlsMode::None);
        assert_eq!(options(&forced).sni.as_deref(), Some("x.com"));
    }

    #[test]
    fn test_explode_vless_tls_param_literal_only() {
        for value in ["1", "yes", "on", "tls"] {
            let node = explode_vless(&format!("uuid@example.com:443?tls={}&sni=x.com", value))
                .unwrap();
            assert!(!options(&node).tls, "tls={} should stay plaintext", value);
            assert_eq!(options(&node).sni, None);
        }

        let node = explode_vless("uuid@example.com:443?tls=TRUE").unwrap();
        assert!(options(&node).tls);
    }

    #[test]
    fn test_explode_vless_label_priority() {
        let node = explode_vless("uuid@example.com:443?remarks=FromParam#FromFragment").unwrap();
        assert_eq!(node.name, "FromFragment");

        let node = explode_vless("uuid@example.com:443?remarks=FromParam").unwrap();
        assert_eq!(node.name, "FromParam");
    }

    #[test]
    fn test_explode_vless_grpc_and_xhttp() {
        let grpc = explode_vless("uuid@example.com:443?type=grpc&serviceName=svc").unwrap();
        assert_eq!(
            options(&grpc).transport,
            Transport::Grpc {
                service_name: Some("svc".into())
            }
        );

        let xhttp = explode_vless("uuid@example.com:443/up?type=xhttp&host=h.example.com").unwrap();
        assert_eq!(
            options(&xhttp).transport,
            Transport::Http {
                method: "GET".into(),
                path: vec!["/up".into()],
                host: Some("h.example.com".into())
            }
        );
    }

    #[test]
    fn test_explode_vless_missing_uuid() {
        assert_eq!(
            explode_vless("@example.com:443"),
            Err(DecodeError::MissingRequiredField("uuid"))
        );
    }
}
