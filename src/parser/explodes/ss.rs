use super::common::default_remark;
use crate::models::{ProxyKind, ProxyRecord, ShadowsocksOptions};
use crate::parser::DecodeError;
use crate::utils::base64::url_safe_base64_decode;
use crate::utils::url::{split_host_port, url_decode, AuthorityUrl};

/// Parse the body of a Shadowsocks link (everything after `ss://`)
///
/// Two layouts are accepted:
/// * SIP002: `base64(method:password)@server:port[/][?query][#remark]`
/// * legacy: `base64(method:password@server:port)[#remark]`
pub fn explode_ss(body: &str) -> Result<ProxyRecord, DecodeError> {
    let before_fragment = body.split('#').next().unwrap_or(body);
    let (remark, server, port, secret) = if before_fragment.contains('@') {
        let url = AuthorityUrl::parse(body)?;
        let secret = url_safe_base64_decode(&url.auth)?;
        (url.fragment, url.host, url.port, secret)
    } else {
        let (encoded, remark) = match body.split_once('#') {
            Some((encoded, frag)) => (encoded, Some(url_decode(frag))),
            None => (body, None),
        };
        let encoded = encoded.split('?').next().unwrap_or(encoded).trim_end_matches('/');
        let decoded = url_safe_base64_decode(encoded)?;
        let (secret, server_port) = decoded.rsplit_once('@').ok_or_else(|| {
            DecodeError::MalformedStructure("missing '@' between credentials and server".into())
        })?;
        let (server, port) = split_host_port(server_port)?;
        (remark, server, port, secret.to_string())
    };

    // The first ':' separates method from password, passwords may contain ':'
    let (method, password) = secret.split_once(':').ok_or_else(|| {
        DecodeError::MalformedStructure("credentials lack a ':' separator".to_string())
    })?;
    if method.is_empty() {
        return Err(DecodeError::MissingRequiredField("cipher"));
    }
    if password.is_empty() {
        return Err(DecodeError::MissingRequiredField("password"));
    }

    let remark = remark
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| default_remark(&server, port));

    Ok(ProxyRecord::new(
        remark,
        server,
        port,
        ProxyKind::Shadowsocks(ShadowsocksOptions {
            cipher: method.to_string(),
            password: password.to_string(),
        }),
    ))
}
