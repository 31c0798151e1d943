//! In-memory record source for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{LookupError, RecordSource, SearchQuery, SearchResponse};

type DelayFn = Box<dyn Fn(&SearchQuery<'_>) -> Duration + Send + Sync>;

/// Answers each dataset with a fixed body, or fails it.
///
/// Datasets that were never configured answer with no records.
#[derive(Default)]
pub struct StaticSource {
    bodies: HashMap<String, Value>,
    failing: Vec<String>,
    delay: Option<DelayFn>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `dataset` with `{"records": [{"fields": f}, ...]}`.
    pub fn with_fields(mut self, dataset: &str, fields: Vec<Value>) -> Self {
        let records: Vec<Value> = fields.into_iter().map(|f| json!({ "fields": f })).collect();
        self.bodies
            .insert(dataset.to_string(), json!({ "records": records }));
        self
    }

    /// Answer `dataset` with a raw body.
    pub fn with_body(mut self, dataset: &str, body: Value) -> Self {
        self.bodies.insert(dataset.to_string(), body);
        self
    }

    pub fn failing(mut self, dataset: &str) -> Self {
        self.failing.push(dataset.to_string());
        self
    }

    pub fn delayed(
        mut self,
        delay: impl Fn(&SearchQuery<'_>) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn search(&self, query: &SearchQuery<'_>) -> Result<SearchResponse, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(query)).await;
        }
        if self.failing.iter().any(|d| d == query.dataset) {
            return Err(LookupError::Server {
                status: 503,
                body: "service unavailable".into(),
            });
        }
        match self.bodies.get(query.dataset) {
            Some(body) => Ok(serde_json::from_value(body.clone())?),
            None => Ok(SearchResponse::default()),
        }
    }
}
