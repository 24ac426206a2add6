use super::common::default_remark;
use crate::models::{Hysteria2Options, ProxyKind, ProxyRecord};
use crate::parser::DecodeError;
use crate::utils::url::{url_decode, AuthorityUrl};
use crate::utils::{split_list, to_bool};

/// Parse the body of a Hysteria2 link (after `hysteria2://` or `hy2://`)
///
/// Format: `password@server:port/?sni=...&insecure=1&obfs=salamander&obfs-password=...#remark`
pub fn explode_hysteria2(body: &str) -> Result<ProxyRecord, DecodeError> {
    let url = AuthorityUrl::parse(body)?;

    let auth = url.non_empty_param("auth").map(url_decode);
    let password = Some(url_decode(url.auth.trim()))
        .filter(|p| !p.is_empty())
        .or_else(|| auth.clone())
        .ok_or(DecodeError::MissingRequiredField("password"))?;

    let up_mbps = url
        .non_empty_param("up")
        .or_else(|| url.non_empty_param("upmbps"))
        .and_then(parse_mbps);
    let down_mbps = url
        .non_empty_param("down")
        .or_else(|| url.non_empty_param("downmbps"))
        .and_then(parse_mbps);

    let remark = url
        .fragment
        .clone()
        .unwrap_or_else(|| default_remark(&url.host, url.port));

    Ok(ProxyRecord::new(
        remark,
        url.host.clone(),
        url.port,
        ProxyKind::Hysteria2(Hysteria2Options {
            password,
            insecure: url.param("insecure").is_some_and(to_bool),
            sni: url
                .non_empty_param("sni")
                .or_else(|| url.non_empty_param("peer"))
                .map(str::to_string),
            alpn: url
                .non_empty_param("alpn")
                .map(|a| split_list(&url_decode(a)))
                .unwrap_or_default(),
            up_mbps,
            down_mbps,
            auth,
            obfs: url.non_empty_param("obfs").map(str::to_string),
            obfs_password: url.non_empty_param("obfs-password").map(url_decode),
        }),
    ))
}

/// Read the leading number of a bandwidth value such as `100`, `50.5` or `100 Mbps`.
fn parse_mbps(value: &str) -> Option<f64> {
    let value = url_decode(value);
    let numeric: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse::<f64>().ok().filter(|v| *v > 0.0)
}
