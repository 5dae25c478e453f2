use crate::{ConfigError, FromEnv, env_parse};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_PORT: u16 = 8080;

/// Listen address of the HTTP listener.
///
/// `HOST` must be an IP literal; it is parsed when the config is loaded so a
/// typo fails at startup instead of at bind time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    listen: SocketAddr,
}

impl ServerConfig {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self {
            listen: SocketAddr::new(ip, port),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.listen
    }

    pub fn port(&self) -> u16 {
        self.listen.port()
    }
}

impl FromEnv for ServerConfig {
    /// `HOST` defaults to all IPv4 interfaces, `PORT` to 8080.
    fn from_env() -> Result<Self, ConfigError> {
        let ip: IpAddr = env_parse("HOST", &Ipv4Addr::UNSPECIFIED.to_string())?;
        let port: u16 = env_parse("PORT", &DEFAULT_PORT.to_string())?;

        Ok(Self::new(ip, port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)
    }
}
