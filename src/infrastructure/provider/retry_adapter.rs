use super::tron_provider::TronTransport;
use crate::errors::error::TransportError;
use crate::log_warn;
use async_trait::async_trait;
use rand::Rng;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// 只读接口，重放不会产生副作用
const READ_ONLY_PATHS: &[&str] = &[
    "wallet/getblockbynum",
    "wallet/getblockbylatestnum",
    "wallet/gettransactioninfobyid",
    "wallet/getaccount",
    "wallet/triggersmartcontract",
];

/// 出账接口（easytransfer*、broadcast）每次调用都可能上链，绝不重放
pub fn is_read_only(path: &str) -> bool {
    READ_ONLY_PATHS.contains(&path.trim_start_matches('/'))
}

/// 宿主层的重试装饰器：适配器核心本身从不重试
pub struct RetryAdapter {
    inner: Arc<dyn TronTransport>,
    max_retries: usize,
    base_delay: Duration,
}

impl RetryAdapter {
    pub fn new(inner: Arc<dyn TronTransport>, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    fn backoff(&self, attempt: usize) -> Duration {
        // 指数倍数，最高 2^10
        let exponent = (attempt - 1).min(10);
        let delay_ms = self.base_delay.as_millis() as u64 * (1u64 << exponent);
        // 0~10% 抖动，避免多个任务同一时间点打到节点
        let jitter = rand::thread_rng().gen_range(0..=(delay_ms / 10 + 1));
        Duration::from_millis(delay_ms + jitter)
    }
}

#[async_trait]
impl TronTransport for RetryAdapter {
    async fn call(&self, path: &str, params: Value) -> Result<Value, TransportError> {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay = self.backoff(attempt);
                log_warn!(
                    "{} 调用失败，正在进行第 {} 次重试，等待 {:?}...",
                    path,
                    attempt + 1,
                    delay
                );
                sleep(delay).await;
            }

            match self.inner.call(path, params.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_transient() && is_read_only(path) && attempt + 1 < self.max_retries => {
                    log_warn!("{} 调用失败 (第 {} 次): {}", path, attempt + 1, e);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Flaky {
        failures: usize,
        calls: AtomicUsize,
        error: fn() -> TransportError,
    }

    #[async_trait]
    impl TronTransport for Flaky {
        async fn call(&self, _path: &str, _params: Value) -> Result<Value, TransportError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err((self.error)())
            } else {
                Ok(json!({ "ok": true }))
            }
        }
    }

    fn unavailable() -> TransportError {
        TransportError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures() {
        let inner = Arc::new(Flaky {
            failures: 2,
            calls: AtomicUsize::new(0),
            error: unavailable,
        });
        let adapter = RetryAdapter::new(inner.clone(), 3, Duration::from_millis(10));

        let result = adapter.call("wallet/getblockbynum", json!({})).await.unwrap();
        assert_eq!(result["ok"], true);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let inner = Arc::new(Flaky {
            failures: 10,
            calls: AtomicUsize::new(0),
            error: unavailable,
        });
        let adapter = RetryAdapter::new(inner.clone(), 2, Duration::from_millis(10));

        assert!(adapter.call("wallet/getblockbynum", json!({})).await.is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn never_replays_withdrawals() {
        for path in [
            "wallet/easytransferbyprivate",
            "wallet/easytransferassetbyprivate",
            "wallet/broadcasttransaction",
        ] {
            let inner = Arc::new(Flaky {
                failures: 1,
                calls: AtomicUsize::new(0),
                error: unavailable,
            });
            let adapter = RetryAdapter::new(inner.clone(), 3, Duration::from_millis(10));

            assert!(adapter.call(path, json!({})).await.is_err());
            assert_eq!(inner.calls.load(Ordering::SeqCst), 1, "{}", path);
        }
    }

    #[test]
    fn classifies_read_only_paths() {
        assert!(is_read_only("wallet/getblockbynum"));
        assert!(is_read_only("/wallet/getaccount"));
        assert!(!is_read_only("wallet/easytransferbyprivate"));
        assert!(!is_read_only("wallet/gettransactionsign"));
    }

    #[tokio::test]
    async fn does_not_retry_rpc_errors() {
        let inner = Arc::new(Flaky {
            failures: 1,
            calls: AtomicUsize::new(0),
            error: || TransportError::Rpc("contract validate error".into()),
        });
        let adapter = RetryAdapter::new(inner.clone(), 5, Duration::from_millis(10));

        assert!(adapter.call("wallet/broadcasttransaction", json!({})).await.is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }
}
