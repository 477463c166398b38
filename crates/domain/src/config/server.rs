use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Upper bound on datagrams being resolved at the same time.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

fn default_dns_port() -> u16 {
    8053
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_max_in_flight() -> usize {
    1024
}
