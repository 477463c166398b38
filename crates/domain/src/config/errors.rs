/// Failures while loading, validating or saving `tinu-dns.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("cannot write config file '{0}': {1}")]
    FileWrite(String, String),

    #[error("malformed config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Validation(String),

    #[error("bind address '{0}' is not an IP address")]
    InvalidListenAddress(String),
}
