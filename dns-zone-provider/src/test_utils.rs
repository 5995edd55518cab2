//! Recording transport double for provider unit tests.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::traits::RpcTransport;
use crate::xmlrpc::Value;

/// One invocation seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<Value>,
}

/// Records every call and replays scripted results per method.
///
/// Methods without a queued result answer `"OK"`.
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<HashMap<String, VecDeque<Result<Value>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next result for `method`.
    pub async fn respond(&self, method: &str, response: Result<Value>) {
        self.responses
            .lock()
            .await
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    pub async fn calls_to(&self, method: &str) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.calls.lock().await.push(RecordedCall {
            method: method.to_string(),
            params,
        });

        self.responses
            .lock()
            .await
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(Value::from("OK")))
    }
}
