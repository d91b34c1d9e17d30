//! In-memory transport for client tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::transport::{BlobTransport, ListQuery, StoreParams, TransportError, TransportResponse};

/// Build a JSON [`TransportResponse`].
pub fn json_response(status: u16, body: serde_json::Value) -> TransportResponse {
    TransportResponse {
        status,
        body: serde_json::to_vec(&body).expect("test body serializes"),
    }
}

/// Scripted transport: answers from a fixed queue (optionally repeating the
/// last response forever) and records every call it sees.
pub struct MockTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    repeat_last: bool,
    failure: Option<String>,
    stores: Mutex<Vec<(usize, StoreParams)>>,
    fetches: Mutex<Vec<String>>,
    lists: Mutex<Vec<ListQuery>>,
    records: Mutex<Vec<(String, bool)>>,
}

impl MockTransport {
    fn build(
        responses: Vec<TransportResponse>,
        repeat_last: bool,
        failure: Option<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            repeat_last,
            failure,
            stores: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
            lists: Mutex::new(Vec::new()),
            records: Mutex::new(Vec::new()),
        })
    }

    pub fn scripted(responses: Vec<TransportResponse>) -> Arc<Self> {
        Self::build(responses, false, None)
    }

    /// Always answer with the same response, however often it is asked.
    pub fn repeating(response: TransportResponse) -> Arc<Self> {
        Self::build(vec![response], true, None)
    }

    /// Fail every call at the transport level.
    pub fn failing(message: &str) -> Arc<Self> {
        Self::build(Vec::new(), false, Some(message.to_string()))
    }

    fn next(&self) -> Result<TransportResponse, TransportError> {
        if let Some(message) = &self.failure {
            return Err(TransportError(message.clone()));
        }
        let mut queue = self.responses.lock().unwrap();
        if self.repeat_last && queue.len() == 1 {
            return Ok(queue.front().expect("non-empty queue").clone());
        }
        queue
            .pop_front()
            .ok_or_else(|| TransportError("mock transport exhausted".into()))
    }

    pub fn store_calls(&self) -> Vec<(usize, StoreParams)> {
        self.stores.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.lists.lock().unwrap().clone()
    }

    pub fn record_calls(&self) -> Vec<(String, bool)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobTransport for MockTransport {
    async fn store(
        &self,
        payload: &[u8],
        params: &StoreParams,
    ) -> Result<TransportResponse, TransportError> {
        self.stores
            .lock()
            .unwrap()
            .push((payload.len(), params.clone()));
        self.next()
    }

    async fn fetch(&self, id: &str) -> Result<TransportResponse, TransportError> {
        self.fetches.lock().unwrap().push(id.to_string());
        self.next()
    }

    async fn list(&self, query: &ListQuery) -> Result<TransportResponse, TransportError> {
        self.lists.lock().unwrap().push(query.clone());
        self.next()
    }

    async fn fetch_record(
        &self,
        id: &str,
        include_encryption_key: bool,
    ) -> Result<TransportResponse, TransportError> {
        self.records
            .lock()
            .unwrap()
            .push((id.to_string(), include_encryption_key));
        self.next()
    }
}
