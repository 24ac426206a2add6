use serde_json::Value;

use super::common::default_remark;
use super::transport::build_transport;
use crate::models::{ProxyKind, ProxyRecord, VmessOptions};
use crate::parser::DecodeError;
use crate::utils::base64::url_safe_base64_decode;
use crate::utils::url::parse_port;

/// Parse the body of a VMess link (everything after `vmess://`)
///
/// The body is Base64 of a JSON object in the v2rayN share format.
pub fn explode_vmess(body: &str) -> Result<ProxyRecord, DecodeError> {
    let decoded = url_safe_base64_decode(body)?;

    // Try to parse as JSON
    let json: Value = serde_json::from_str(&decoded)
        .map_err(|e| DecodeError::MalformedStructure(format!("invalid vmess json: {}", e)))?;
    if !json.is_object() {
        return Err(DecodeError::MalformedStructure(
            "vmess payload is not a json object".to_string(),
        ));
    }

    // Extract required fields
    let server = json_str(&json, "add").ok_or(DecodeError::MissingRequiredField("add"))?;
    let port = json_str(&json, "port").ok_or(DecodeError::MissingRequiredField("port"))?;
    let port = parse_port(&port)?;
    let uuid = json_str(&json, "id").ok_or(DecodeError::MissingRequiredField("id"))?;

    // Optional fields fall back to the share-format defaults
    let alter_id = json_str(&json, "aid")
        .and_then(|aid| aid.parse::<u32>().ok())
        .unwrap_or(0);
    let cipher = json_str(&json, "scy").unwrap_or_else(|| "auto".to_string());
    let network = json_str(&json, "net").unwrap_or_else(|| "tcp".to_string());
    let tls = json_str(&json, "tls").is_some_and(|tls| tls.eq_ignore_ascii_case("true"));
    let host = json_str(&json, "host");
    let path = json_str(&json, "path");
    let sni = json_str(&json, "sni");

    // grpc links carry the service name in the path field
    let service_name = if network == "grpc" { path.clone() } else { None };
    let transport = build_transport(&network, path, host, service_name);

    let remark = json_str(&json, "ps").unwrap_or_else(|| default_remark(&server, port));

    Ok(ProxyRecord::new(
        remark,
        server,
        port,
        ProxyKind::VMess(VmessOptions {
            uuid,
            alter_id,
            cipher,
            tls,
            sni,
            transport,
        }),
    ))
}

/// Non-empty string value of a field that producers emit either as a JSON
/// string or as a number.
fn json_str(json: &Value, key: &str) -> Option<String> {
    let value = match &json[key] {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
