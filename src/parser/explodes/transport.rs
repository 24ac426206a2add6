use crate::models::Transport;

/// Path used for `xhttp` links that do not name one.
const DEFAULT_HTTP_PATH: &str = "/";

/// Build the transport options block for a network kind.
///
/// Options a link does not carry stay `None`; only the kinds that need a
/// container (`ws`, `grpc`, `h2`, `xhttp`) get one. `xhttp` is normalized to
/// an HTTP transport with a synthesized `GET` method and path list.
pub fn build_transport(
    network: &str,
    path: Option<String>,
    host: Option<String>,
    service_name: Option<String>,
) -> Transport {
    match network {
        "" | "tcp" => Transport::Tcp,
        "ws" => Transport::Ws { path, host },
        "grpc" => Transport::Grpc { service_name },
        "h2" => Transport::H2 { path, host },
        "xhttp" => Transport::Http {
            method: "GET".to_string(),
            path: vec![path.unwrap_or_else(|| DEFAULT_HTTP_PATH.to_string())],
            host,
        },
        other => Transport::Other(other.to_string()),
    }
}
