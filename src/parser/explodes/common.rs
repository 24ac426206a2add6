use super::{hysteria2, ss, ssr, vless, vmess};
use crate::models::ProxyRecord;
use crate::parser::DecodeError;
use crate::utils::truncate_chars;

/// Number of leading characters kept when reporting an unknown link type.
const SCHEME_PREVIEW_CHARS: usize = 20;

/// Explode a proxy link into a ProxyRecord
///
/// This function detects the type of proxy link by its literal prefix and
/// hands the remainder to the matching decoder. Decoder errors are returned
/// unchanged.
pub fn explode(link: &str) -> Result<ProxyRecord, DecodeError> {
    let link = link.trim();

    if let Some(body) = link.strip_prefix("ssr://") {
        ssr::explode_ssr(body)
    } else if let Some(body) = link.strip_prefix("vmess://") {
        vmess::explode_vmess(body)
    } else if let Some(body) = link.strip_prefix("ss://") {
        ss::explode_ss(body)
    } else if let Some(body) = link.strip_prefix("vless://") {
        vless::explode_vless(body)
    } else if let Some(body) = link
        .strip_prefix("hysteria2://")
        .or_else(|| link.strip_prefix("hy2://"))
    {
        hysteria2::explode_hysteria2(body)
    } else {
        Err(DecodeError::UnsupportedScheme(truncate_chars(
            link,
            SCHEME_PREVIEW_CHARS,
        )))
    }
}

/// Label used when a link carries none.
pub fn default_remark(server: &str, port: u16) -> String {
    format!("{} ({})", server, port)
}
