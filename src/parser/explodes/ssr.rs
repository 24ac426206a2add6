use super::common::default_remark;
use crate::models::{ProxyKind, ProxyRecord, ShadowsocksROptions};
use crate::parser::DecodeError;
use crate::utils::base64::{url_safe_base64_decode, url_safe_base64_decode_or_raw};
use crate::utils::url::parse_port;

/// Parse the body of a ShadowsocksR link (everything after `ssr://`)
///
/// The body is URL-safe Base64 of
/// `server:port:protocol:method:obfs:base64(password)[/?key=base64(value)&...]`.
pub fn explode_ssr(body: &str) -> Result<ProxyRecord, DecodeError> {
    let decoded = url_safe_base64_decode(body)?;

    // Split the positional part from the parameters
    let (main_part, params_part) = match decoded.split_once('?') {
        Some((main, params)) => (main, params),
        None => (decoded.as_str(), ""),
    };

    let parts: Vec<&str> = main_part.split(':').collect();
    if parts.len() != 6 {
        return Err(DecodeError::MalformedStructure(format!(
            "expected 6 ':'-separated fields, found {}",
            parts.len()
        )));
    }

    let server = parts[0].trim();
    if server.is_empty() {
        return Err(DecodeError::MissingRequiredField("server"));
    }
    let port = parse_port(parts[1])?;
    let protocol = parts[2];
    let method = parts[3];
    let obfs = parts[4];

    // The password segment may keep the '/' that introduced the parameters
    let password_encoded = parts[5].strip_suffix('/').unwrap_or(parts[5]);
    let password = url_safe_base64_decode(password_encoded)?;
    if password.is_empty() {
        return Err(DecodeError::MissingRequiredField("password"));
    }

    // Parameter values are Base64 when possible, literal otherwise
    let mut remark = None;
    let mut protocol_param = None;
    let mut obfs_param = None;
    for pair in params_part.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = url_safe_base64_decode_or_raw(value);
        match key {
            "remarks" => remark = Some(value),
            "protoparam" => protocol_param = non_blank(value),
            "obfsparam" => obfs_param = non_blank(value),
            _ => {}
        }
    }

    let remark = remark
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| default_remark(server, port));

    Ok(ProxyRecord::new(
        remark,
        server,
        port,
        ProxyKind::ShadowsocksR(ShadowsocksROptions {
            protocol: protocol.to_string(),
            cipher: method.to_string(),
            obfs: obfs.to_string(),
            password,
            protocol_param,
            obfs_param,
        }),
    ))
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
