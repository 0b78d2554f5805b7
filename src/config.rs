use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::game::uno_game::DEFAULT_HAND_SIZE;
use crate::protocol::MAX_FRAME_LEN;

pub const DEFAULT_PORT: u16 = 10001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub max_frame_len: usize,
    pub hand_size: usize,
    /// Fixes every shuffle of the match; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_frame_len: MAX_FRAME_LEN,
            hand_size: DEFAULT_HAND_SIZE,
            seed: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            name: "player".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
