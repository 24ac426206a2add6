//! Identity keys used to drop duplicate nodes
//!
//! Two records describe the same endpoint when their keys are equal. Keys
//! ignore the display name and anything else that does not change where or
//! how a client connects.

use crate::models::{
    Hysteria2Options, ProxyKind, ProxyRecord, ShadowsocksOptions, ShadowsocksROptions, Transport,
    VlessOptions, VmessOptions,
};

/// Compute the identity key of a record.
///
/// The key always starts with `type_server_port`; each scheme then appends
/// the fields that tell two of its endpoints apart.
pub fn identity_key(record: &ProxyRecord) -> String {
    let mut parts = vec![
        record.proxy_type().as_str().to_string(),
        record.server.clone(),
        record.port.to_string(),
    ];

    match &record.kind {
        ProxyKind::ShadowsocksR(opts) => ssr_parts(opts, &mut parts),
        ProxyKind::VMess(opts) => vmess_parts(opts, &mut parts),
        ProxyKind::Shadowsocks(opts) => ss_parts(opts, &mut parts),
        ProxyKind::Vless(opts) => vless_parts(opts, &mut parts),
        ProxyKind::Hysteria2(opts) => hysteria2_parts(opts, &mut parts),
    }

    parts.join("_")
}

fn ssr_parts(opts: &ShadowsocksROptions, parts: &mut Vec<String>) {
    parts.push(opts.protocol.clone());
    parts.push(opts.cipher.clone());
    parts.push(opts.obfs.clone());
    parts.push(opts.password.clone());
}

fn vmess_parts(opts: &VmessOptions, parts: &mut Vec<String>) {
    parts.push(opts.uuid.clone());
    parts.push(opts.alter_id.to_string());
    parts.push(opts.cipher.clone());
    parts.push(opts.transport.network().to_string());
    // grpc and h2 options stay out of the key
    if let Transport::Ws { path, host } = &opts.transport {
        parts.extend(path.iter().cloned());
        parts.extend(host.iter().cloned());
    }
}

fn ss_parts(opts: &ShadowsocksOptions, parts: &mut Vec<String>) {
    parts.push(opts.cipher.clone());
    parts.push(opts.password.clone());
}

fn vless_parts(opts: &VlessOptions, parts: &mut Vec<String>) {
    parts.push(opts.uuid.clone());
    parts.push(opts.transport.network().to_string());
    if opts.tls {
        parts.push("tls".to_string());
    }
    parts.extend(opts.sni.iter().cloned());
    match &opts.transport {
        Transport::Ws { path, host } => {
            parts.extend(path.iter().cloned());
            parts.extend(host.iter().cloned());
        }
        Transport::Http { method, path, .. } => {
            parts.extend(path.first().cloned());
            parts.push(method.clone());
        }
        _ => {}
    }
}

fn hysteria2_parts(opts: &Hysteria2Options, parts: &mut Vec<String>) {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let mbps = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();

    parts.push(opts.password.clone());
    parts.push(text(&opts.sni));
    parts.push(opts.alpn.join(","));
    parts.push(mbps(opts.up_mbps));
    parts.push(mbps(opts.down_mbps));
    parts.push(text(&opts.auth));
    parts.push(text(&opts.obfs));
    parts.push(text(&opts.obfs_password));
}
