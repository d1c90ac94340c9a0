#[cfg(feature = "aws")]
pub mod aws;
pub mod chart_http;
#[cfg(test)]
pub mod fake;
#[cfg(any(feature = "aws", test))]
pub mod init_once;

use anyhow::Result;
use std::future::Future;

use crate::core::chart::ChartRequest;
use crate::core::kind::ResourceKind;
use crate::core::models::metric::{RawSample, StatisticsQuery};
use crate::core::models::resource::ResourceDetail;

/// Lists and describes resources of one kind.
pub trait ResourceCatalog {
    /// Every identifier of `kind`, following pagination to the end.
    fn list(&self, kind: ResourceKind) -> impl Future<Output = Result<Vec<String>>> + Send;

    fn describe(
        &self,
        kind: ResourceKind,
        id: &str,
    ) -> impl Future<Output = Result<ResourceDetail>> + Send;
}

/// Raw statistics for one metric over one window.
pub trait MetricProvider {
    fn get_statistics(
        &self,
        query: &StatisticsQuery,
    ) -> impl Future<Output = Result<Vec<RawSample>>> + Send;
}

/// External chart renderer. Returns the URL of the rendered chart.
pub trait ChartService {
    fn create_chart(
        &self,
        endpoint: &str,
        request: &ChartRequest,
    ) -> impl Future<Output = Result<String>> + Send;
}
