#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tron_adapter::errors::TransportError;
use tron_adapter::infrastructure::codec::{AddressCodec, TronAddressCodec};
use tron_adapter::infrastructure::provider::{TransportFactory, TronTransport};

type Handler = dyn Fn(&str, &Value) -> Result<Value, TransportError> + Send + Sync;

/// 按路径返回预置响应，并记录每次调用
pub struct MockTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&str, &Value) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|(path, _)| path).collect()
    }

    pub fn call_to(&self, path: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .find(|(p, _)| p == path)
            .map(|(_, params)| params)
    }
}

#[async_trait]
impl TronTransport for MockTransport {
    async fn call(&self, path: &str, params: Value) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), params.clone()));
        (self.handler)(path, &params)
    }
}

/// 工厂总是返回同一个 mock，同时记录传入的节点地址
pub fn factory(mock: Arc<MockTransport>, uris: Arc<Mutex<Vec<String>>>) -> TransportFactory {
    Arc::new(move |uri: &str| {
        uris.lock().unwrap().push(uri.to_string());
        Ok(mock.clone() as Arc<dyn TronTransport>)
    })
}

pub fn simple_factory(mock: Arc<MockTransport>) -> TransportFactory {
    factory(mock, Arc::new(Mutex::new(Vec::new())))
}

pub const USDT_CONTRACT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";
pub const USDT_CONTRACT_HEX: &str = "41a614f803b6fd780986a42c78ec9c7f77e6ded13c";

/// 用重复字节构造一个合法的 hex 地址
pub fn hex_address(byte: &str) -> String {
    format!("41{}", byte.repeat(20))
}

pub fn address(byte: &str) -> String {
    TronAddressCodec.encode_address(&hex_address(byte)).unwrap()
}

pub fn unexpected(path: &str) -> Result<Value, TransportError> {
    Err(TransportError::Rpc(format!("unexpected call to {}", path)))
}
