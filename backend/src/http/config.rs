//! Listener settings for the HTTP server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3000;

/// Address the server binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read `HOST` and `PORT`, falling back to `0.0.0.0:3000`.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var("HOST").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )
    }

    pub fn from_values(host: Option<&str>, port: Option<&str>) -> Result<Self> {
        let defaults = Self::default();

        let host = match host.map(str::trim).filter(|h| !h.is_empty()) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("HOST is not an IP address: {}", raw))?,
            None => defaults.host,
        };
        let port = match port.map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", raw))?,
            None => defaults.port,
        };

        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
