use reqwest::StatusCode;
use thiserror::Error;

/// 传输层错误：HTTP、JSON 或节点返回的 RPC 错误
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Node returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response shape from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl TransportError {
    /// 网络抖动类错误，可以由宿主层重试
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            TransportError::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Withdrawal from {from} to {to} failed.")]
    WithdrawalFailed { from: String, to: String },

    #[error("Malformed chain data: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Missing setting: {0}")]
    MissingSetting(String),

    #[error("Undefined currency: {0}")]
    UndefinedCurrency(String),

    #[error(
        "Failed to convert value to base (smallest) unit because it exceeds the maximum precision: {value} * {base_factor} is not an integer"
    )]
    Precision { value: String, base_factor: u64 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl AdapterError {
    pub fn missing(key: &str) -> Self {
        AdapterError::MissingSetting(key.to_string())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, AdapterError::Client(_))
    }
}

impl From<TransportError> for AdapterError {
    fn from(err: TransportError) -> Self {
        AdapterError::Client(ClientError::Transport(err))
    }
}

/// 地址/ABI 编解码错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid base58 encoding: {0}")]
    Base58(String),

    #[error("Invalid hex encoding: {0}")]
    Hex(String),

    #[error("Invalid address length: {0}")]
    Length(usize),

    #[error("Invalid checksum for {0}")]
    Checksum(String),

    #[error("ABI parameter wider than 32 bytes: {0}")]
    AbiOverflow(String),
}

pub type Result<T> = std::result::Result<T, AdapterError>;
