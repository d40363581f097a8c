use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("{protocol} ping requires a valid destination port between 0 and 65535, got {port}")]
    InvalidPort { protocol: String, port: i64 },
    #[error("FQDN {0} does not resolve to any known ip")]
    EmptyResolution(String),
    #[error("destination IP is invalid: {0}")]
    InvalidAddress(String),
    #[error("protocol {0} is not supported")]
    UnsupportedProtocol(String),
    #[error("Invalid target {0}, expected host:port")]
    InvalidTarget(String),
    #[error("{protocol} request cannot run with a {strategy} strategy")]
    StrategyMismatch { protocol: String, strategy: String },
    #[error("Cannot read parameters from {path}: {source}")]
    ReadParams {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid parameters: {0}")]
    Params(#[from] serde_json::Error),
    #[error("Network error: {0}")]
    Io(#[from] std::io::Error),
}
