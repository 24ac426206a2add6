//! Clash proxy entries as written to the `proxies` list.

use serde::Serialize;

use crate::models::{
    Hysteria2Options, ProxyKind, ProxyRecord, ShadowsocksOptions, ShadowsocksROptions, Transport,
    VlessOptions, VmessOptions,
};

/// Fields shared by every proxy type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommonProxyOptions {
    pub name: String,
    pub server: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
}

impl CommonProxyOptions {
    pub fn new(record: &ProxyRecord) -> Self {
        Self {
            name: record.name.clone(),
            server: record.server.clone(),
            port: record.port,
            udp: None,
            tls: None,
            skip_cert_verify: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostHeader {
    #[serde(rename = "Host")]
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostListHeader {
    #[serde(rename = "Host")]
    pub host: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WsOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HostHeader>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GrpcOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_service_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct H2Opts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpOpts {
    pub method: String,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HostListHeader>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RealityOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
}

/// Network option blocks. Only the block matching the network is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransportOpts {
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_opts: Option<GrpcOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h2_opts: Option<H2Opts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_opts: Option<HttpOpts>,
}

impl From<&Transport> for TransportOpts {
    fn from(transport: &Transport) -> Self {
        let mut opts = TransportOpts {
            network: transport.network().to_string(),
            ..Default::default()
        };
        match transport {
            Transport::Ws { path, host } => {
                opts.ws_opts = Some(WsOpts {
                    path: path.clone(),
                    headers: host.clone().map(|host| HostHeader { host }),
                });
            }
            Transport::Grpc { service_name } => {
                opts.grpc_opts = Some(GrpcOpts {
                    grpc_service_name: service_name.clone(),
                });
            }
            Transport::H2 { path, host } => {
                opts.h2_opts = Some(H2Opts {
                    path: path.clone(),
                    host: host.clone().map(|h| vec![h]),
                });
            }
            Transport::Http { method, path, host } => {
                opts.http_opts = Some(HttpOpts {
                    method: method.clone(),
                    path: path.clone(),
                    headers: host.clone().map(|h| HostListHeader { host: vec![h] }),
                });
            }
            Transport::Tcp | Transport::Other(_) => {}
        }
        opts
    }
}

/// A Clash proxy entry, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ClashProxy {
    #[serde(rename = "ssr", rename_all = "kebab-case")]
    ShadowsocksR {
        #[serde(flatten)]
        common: CommonProxyOptions,
        cipher: String,
        password: String,
        protocol: String,
        obfs: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        protocol_param: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        obfs_param: Option<String>,
    },
    #[serde(rename = "vmess")]
    VMess {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(rename = "alterId")]
        alter_id: u32,
        cipher: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        servername: Option<String>,
        #[serde(flatten)]
        transport: TransportOpts,
    },
    #[serde(rename = "ss")]
    Shadowsocks {
        #[serde(flatten)]
        common: CommonProxyOptions,
        cipher: String,
        password: String,
    },
    #[serde(rename = "vless", rename_all = "kebab-case")]
    Vless {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        flow: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        servername: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        alpn: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reality_opts: Option<RealityOpts>,
        #[serde(skip_serializing_if = "Option::is_none")]
        client_fingerprint: Option<String>,
        #[serde(flatten)]
        transport: TransportOpts,
    },
    #[serde(rename = "hysteria2", rename_all = "kebab-case")]
    Hysteria2 {
        #[serde(flatten)]
        common: CommonProxyOptions,
        password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        sni: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        alpn: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        up: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        down: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        obfs: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        obfs_password: Option<String>,
    },
}

impl From<&ProxyRecord> for ClashProxy {
    fn from(record: &ProxyRecord) -> Self {
        let common = CommonProxyOptions::new(record);
        match &record.kind {
            ProxyKind::ShadowsocksR(opts) => ssr(common, opts),
            ProxyKind::VMess(opts) => vmess(common, opts),
            ProxyKind::Shadowsocks(opts) => ss(common, opts),
            ProxyKind::Vless(opts) => vless(common, opts),
            ProxyKind::Hysteria2(opts) => hysteria2(common, opts),
        }
    }
}

fn ssr(mut common: CommonProxyOptions, opts: &ShadowsocksROptions) -> ClashProxy {
    common.udp = Some(true);
    ClashProxy::ShadowsocksR {
        common,
        cipher: opts.cipher.clone(),
        password: opts.password.clone(),
        protocol: opts.protocol.clone(),
        obfs: opts.obfs.clone(),
        protocol_param: opts.protocol_param.clone(),
        obfs_param: opts.obfs_param.clone(),
    }
}

fn vmess(mut common: CommonProxyOptions, opts: &VmessOptions) -> ClashProxy {
    common.udp = Some(true);
    common.tls = Some(opts.tls);
    common.skip_cert_verify = Some(true);
    ClashProxy::VMess {
        common,
        uuid: opts.uuid.clone(),
        alter_id: opts.alter_id,
        cipher: opts.cipher.clone(),
        servername: opts.sni.clone(),
        transport: TransportOpts::from(&opts.transport),
    }
}

fn ss(mut common: CommonProxyOptions, opts: &ShadowsocksOptions) -> ClashProxy {
    common.udp = Some(true);
    ClashProxy::Shadowsocks {
        common,
        cipher: opts.cipher.clone(),
        password: opts.password.clone(),
    }
}

fn vless(mut common: CommonProxyOptions, opts: &VlessOptions) -> ClashProxy {
    common.udp = Some(opts.udp);
    common.tls = Some(opts.tls);
    common.skip_cert_verify = Some(true);

    let reality = opts.reality.as_ref();
    ClashProxy::Vless {
        common,
        uuid: opts.uuid.clone(),
        flow: opts.flow.clone(),
        servername: opts.sni.clone(),
        alpn: opts.alpn.clone(),
        reality_opts: reality.map(|r| RealityOpts {
            public_key: r.public_key.clone(),
            short_id: r.short_id.clone(),
        }),
        client_fingerprint: reality.and_then(|r| r.fingerprint.clone()),
        transport: TransportOpts::from(&opts.transport),
    }
}

fn hysteria2(mut common: CommonProxyOptions, opts: &Hysteria2Options) -> ClashProxy {
    common.skip_cert_verify = Some(opts.insecure);
    ClashProxy::Hysteria2 {
        common,
        password: opts.password.clone(),
        sni: opts.sni.clone(),
        alpn: opts.alpn.clone(),
        up: opts.up_mbps.map(format_mbps),
        down: opts.down_mbps.map(format_mbps),
        obfs: opts.obfs.clone(),
        obfs_password: opts.obfs_password.clone(),
    }
}

fn format_mbps(value: f64) -> String {
    format!("{} Mbps", value)
}
