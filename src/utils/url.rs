//! URL encoding/decoding utilities

use crate::parser::DecodeError;

/// Decodes a URL-encoded string
///
/// # Arguments
/// * `input` - The URL-encoded string to decode
///
/// # Returns
/// * String containing the decoded input
/// * Returns the original string if decoding fails
///
/// # Examples
/// ```
/// use nodeweave::utils::url::url_decode;
///
/// let decoded = url_decode("Hello%20World%21");
/// assert_eq!(decoded, "Hello World!");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Parse a port number, rejecting 0 and anything outside 1-65535.
pub fn parse_port(input: &str) -> Result<u16, DecodeError> {
    match input.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(DecodeError::MalformedStructure(format!(
            "invalid port '{}'",
            input
        ))),
        Ok(port) => Ok(port),
    }
}

/// A link body of the shape `<auth>@<host>:<port>[/path][?query][#fragment]`.
///
/// Query values are kept exactly as written; only the fragment is
/// percent-decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorityUrl {
    pub auth: String,
    pub host: String,
    pub port: u16,
    /// Path including its leading `/`; `None` when absent or just `/`
    pub path: Option<String>,
    pub query: Vec<(String, String)>,
    pub fragment: Option<String>,
}

impl AuthorityUrl {
    /// Split a link body (everything after `scheme://`).
    pub fn parse(body: &str) -> Result<Self, DecodeError> {
        let (rest, fragment) = match body.split_once('#') {
            Some((rest, frag)) => (rest, Some(url_decode(frag))),
            None => (body, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, parse_query(query)),
            None => (rest, Vec::new()),
        };

        // The authority ends at the last '@' so that secrets containing '@' survive
        let (auth, server_part) = rest.rsplit_once('@').ok_or_else(|| {
            DecodeError::MalformedStructure("missing '@' between credentials and server".into())
        })?;

        let (host_port, path) = split_path(server_part);
        let (host, port) = split_host_port(host_port)?;

        Ok(Self {
            auth: auth.to_string(),
            host,
            port,
            path,
            query,
            fragment: fragment.filter(|f| !f.is_empty()),
        })
    }

    /// First value of a query parameter, as written in the link.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`AuthorityUrl::param`] but treats `key=` as absent.
    pub fn non_empty_param(&self, key: &str) -> Option<&str> {
        self.param(key).filter(|v| !v.is_empty())
    }
}

/// Parse `a=1&b=2` into ordered pairs. Segments without `=` are dropped and
/// only the first `=` separates key from value.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn split_path(server_part: &str) -> (&str, Option<String>) {
    // '/' inside a bracketed IPv6 literal never occurs, so the first one starts the path
    match server_part.find('/') {
        Some(pos) => {
            let path = &server_part[pos..];
            let path = if path == "/" { None } else { Some(path.to_string()) };
            (&server_part[..pos], path)
        }
        None => (server_part, None),
    }
}

/// Split `host:port` or `[v6]:port`, stripping the brackets.
pub fn split_host_port(host_port: &str) -> Result<(String, u16), DecodeError> {
    let (host, port) = host_port.rsplit_once(':').ok_or_else(|| {
        DecodeError::MalformedStructure(format!("server '{}' has no port", host_port))
    })?;
    let host = host.trim_start_matches('[').trim_end_matches(']').trim();
    if host.is_empty() {
        return Err(DecodeError::MissingRequiredField("server"));
    }
    Ok((host.to_string(), parse_port(port)?))
}
