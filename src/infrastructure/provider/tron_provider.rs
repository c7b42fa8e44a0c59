use crate::errors::error::TransportError;
use crate::log_debug;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 节点 HTTP API 传输层：`call(path, params) -> json`
#[async_trait]
pub trait TronTransport: Send + Sync {
    async fn call(&self, path: &str, params: Value) -> Result<Value, TransportError>;
}

/// 根据配置的节点地址构建传输层；宿主和测试可以替换
pub type TransportFactory =
    Arc<dyn Fn(&str) -> Result<Arc<dyn TronTransport>, TransportError> + Send + Sync>;

pub fn http_transport_factory(timeout: Duration) -> TransportFactory {
    Arc::new(move |uri: &str| {
        let transport = HttpTransport::with_timeout(uri, timeout)?;
        Ok(Arc::new(transport) as Arc<dyn TronTransport>)
    })
}

pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(uri: &str) -> Result<Self, TransportError> {
        Self::with_timeout(uri, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(uri: &str, timeout: Duration) -> Result<Self, TransportError> {
        // 保证 join 时保留 uri 上已有的路径
        let base = if uri.ends_with('/') {
            uri.to_string()
        } else {
            format!("{}/", uri)
        };
        let base_url = Url::parse(&base)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl TronTransport for HttpTransport {
    async fn call(&self, path: &str, params: Value) -> Result<Value, TransportError> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        log_debug!("POST {}", url);

        let resp = self.client.post(url).json(&params).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".into());
            return Err(TransportError::Status { status, body });
        }

        let body = resp.text().await?;
        let json: Value = serde_json::from_str(&body)?;
        check_rpc_error(json)
    }
}

/// 节点在 HTTP 200 里用 `Error` 字段报告错误
pub fn check_rpc_error(json: Value) -> Result<Value, TransportError> {
    match json.get("Error") {
        Some(Value::String(message)) => Err(TransportError::Rpc(message.clone())),
        Some(other) => Err(TransportError::Rpc(other.to_string())),
        None => Ok(json),
    }
}
