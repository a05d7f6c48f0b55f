use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

const DEFAULT_DNS_PORT: u16 = 53;

/// Upstream resolver endpoint. Only plain UDP is spoken to upstreams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpstreamServer {
    addr: SocketAddr,
}

impl UpstreamServer {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

fn parse_addr(s: &str) -> Option<SocketAddr> {
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Some(addr);
    }
    let bare = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);
    bare.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
}

impl FromStr for UpstreamServer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let addr_str = s.strip_prefix("udp://").unwrap_or(s);
        if let Some((scheme, _)) = addr_str.split_once("://") {
            return Err(format!(
                "Unsupported upstream protocol '{}' in '{}'. Only UDP upstreams are supported",
                scheme, s
            ));
        }
        parse_addr(addr_str).map(Self::new).ok_or_else(|| {
            format!(
                "Invalid upstream address '{}'. Expected: IP, IP:PORT or udp://IP:PORT",
                s
            )
        })
    }
}

impl fmt::Display for UpstreamServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "udp://{}", self.addr)
    }
}
