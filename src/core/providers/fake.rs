//! In-memory providers for tests. Each records the calls it receives.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::chart::ChartRequest;
use crate::core::kind::ResourceKind;
use crate::core::models::metric::{RawSample, StatisticsQuery};
use crate::core::models::resource::ResourceDetail;
use crate::core::providers::{ChartService, MetricProvider, ResourceCatalog};

#[derive(Default)]
pub struct FakeCatalog {
    pub identifiers: Vec<String>,
    pub details: HashMap<String, ResourceDetail>,
    pub list_error: Option<String>,
    /// Identifier whose describe call fails
    pub failing_id: Option<String>,
    list_calls: Mutex<usize>,
    describe_calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_identifiers(ids: &[&str]) -> Self {
        Self {
            identifiers: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, id: &str, detail: ResourceDetail) -> Self {
        self.details.insert(id.to_string(), detail);
        self
    }

    pub fn list_call_count(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    pub fn described(&self) -> Vec<String> {
        self.describe_calls.lock().unwrap().clone()
    }
}

impl ResourceCatalog for FakeCatalog {
    async fn list(&self, _kind: ResourceKind) -> Result<Vec<String>> {
        *self.list_calls.lock().unwrap() += 1;
        if let Some(err) = &self.list_error {
            anyhow::bail!("{}", err);
        }
        Ok(self.identifiers.clone())
    }

    async fn describe(&self, _kind: ResourceKind, id: &str) -> Result<ResourceDetail> {
        self.describe_calls.lock().unwrap().push(id.to_string());
        if self.failing_id.as_deref() == Some(id) {
            anyhow::bail!("AccessDenied on {}", id);
        }
        Ok(self.details.get(id).cloned().unwrap_or_default())
    }
}

type Responder = Box<dyn Fn(&StatisticsQuery) -> Result<Vec<RawSample>> + Send + Sync>;

pub struct FakeMetrics {
    responder: Responder,
    calls: Mutex<Vec<StatisticsQuery>>,
}

impl FakeMetrics {
    pub fn new(
        responder: impl Fn(&StatisticsQuery) -> Result<Vec<RawSample>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Provider that has no samples for anything.
    pub fn empty() -> Self {
        Self::new(|_| Ok(Vec::new()))
    }

    pub fn calls(&self) -> Vec<StatisticsQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl MetricProvider for FakeMetrics {
    async fn get_statistics(&self, query: &StatisticsQuery) -> Result<Vec<RawSample>> {
        self.calls.lock().unwrap().push(query.clone());
        (self.responder)(query)
    }
}

pub struct FakeCharts {
    result: std::result::Result<String, String>,
    calls: Mutex<Vec<(String, ChartRequest)>>,
}

impl FakeCharts {
    pub fn returning(url: &str) -> Self {
        Self {
            result: Ok(url.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, ChartRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ChartService for FakeCharts {
    async fn create_chart(&self, endpoint: &str, request: &ChartRequest) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), request.clone()));
        self.result.clone().map_err(|e| anyhow::anyhow!(e))
    }
}
