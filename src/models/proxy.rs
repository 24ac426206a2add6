//! Proxy model definitions
//!
//! Contains the canonical, scheme-tagged representation of a decoded node.

/// Represents the type of a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyType {
    ShadowsocksR,
    VMess,
    Shadowsocks,
    Vless,
    Hysteria2,
}

impl ProxyType {
    /// The `type` value Clash uses for this proxy.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::ShadowsocksR => "ssr",
            ProxyType::VMess => "vmess",
            ProxyType::Shadowsocks => "ss",
            ProxyType::Vless => "vless",
            ProxyType::Hysteria2 => "hysteria2",
        }
    }
}

/// TLS mode requested by a VLESS link's `security` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    #[default]
    None,
    Tls,
    Reality,
    Xtls,
}

impl TlsMode {
    pub fn from_param(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tls" => TlsMode::Tls,
            "reality" => TlsMode::Reality,
            "xtls" => TlsMode::Xtls,
            _ => TlsMode::None,
        }
    }
}

/// Transport layer of a VMess or VLESS node, keyed by network kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Transport {
    #[default]
    Tcp,
    Ws {
        path: Option<String>,
        host: Option<String>,
    },
    Grpc {
        service_name: Option<String>,
    },
    H2 {
        path: Option<String>,
        host: Option<String>,
    },
    /// HTTP-like transport; `xhttp` links are normalized into this
    Http {
        method: String,
        path: Vec<String>,
        host: Option<String>,
    },
    /// Any other network kind, carried by name without options
    Other(String),
}

impl Transport {
    /// Network kind as Clash names it.
    pub fn network(&self) -> &str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Ws { .. } => "ws",
            Transport::Grpc { .. } => "grpc",
            Transport::H2 { .. } => "h2",
            Transport::Http { .. } => "http",
            Transport::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowsocksROptions {
    pub protocol: String,
    pub cipher: String,
    pub obfs: String,
    pub password: String,
    pub protocol_param: Option<String>,
    pub obfs_param: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VmessOptions {
    pub uuid: String,
    pub alter_id: u32,
    pub cipher: String,
    pub tls: bool,
    pub sni: Option<String>,
    pub transport: Transport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowsocksOptions {
    pub cipher: String,
    pub password: String,
}

/// REALITY handshake parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RealityOptions {
    pub public_key: Option<String>,
    pub short_id: Option<String>,
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VlessOptions {
    pub uuid: String,
    pub security: TlsMode,
    pub tls: bool,
    pub sni: Option<String>,
    pub alpn: Vec<String>,
    pub reality: Option<RealityOptions>,
    pub flow: Option<String>,
    pub udp: bool,
    pub transport: Transport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hysteria2Options {
    pub password: String,
    pub insecure: bool,
    pub sni: Option<String>,
    pub alpn: Vec<String>,
    /// upload limit in Mbps
    pub up_mbps: Option<f64>,
    /// download limit in Mbps
    pub down_mbps: Option<f64>,
    pub auth: Option<String>,
    pub obfs: Option<String>,
    pub obfs_password: Option<String>,
}

/// Scheme specific part of a record. Each variant only carries the fields
/// its scheme defines.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyKind {
    ShadowsocksR(ShadowsocksROptions),
    VMess(VmessOptions),
    Shadowsocks(ShadowsocksOptions),
    Vless(VlessOptions),
    Hysteria2(Hysteria2Options),
}

/// A decoded proxy node.
///
/// `name` holds the raw label taken from the link until the name normalizer
/// replaces it with the final display name.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRecord {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub kind: ProxyKind,
}

impl ProxyRecord {
    pub fn new(name: impl Into<String>, server: impl Into<String>, port: u16, kind: ProxyKind) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
            port,
            kind,
        }
    }

    pub fn proxy_type(&self) -> ProxyType {
        match self.kind {
            ProxyKind::ShadowsocksR(_) => ProxyType::ShadowsocksR,
            ProxyKind::VMess(_) => ProxyType::VMess,
            ProxyKind::Shadowsocks(_) => ProxyType::Shadowsocks,
            ProxyKind::Vless(_) => ProxyType::Vless,
            ProxyKind::Hysteria2(_) => ProxyType::Hysteria2,
        }
    }
}
