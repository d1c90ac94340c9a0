use log::debug;

use crate::core::error::ReportError;
use crate::core::kind::ResourceKind;
use crate::core::models::metric::{
    Datapoint, DatapointSeries, MetricWindow, RawSample, Statistic, StatisticsQuery,
};
use crate::core::providers::MetricProvider;
use crate::core::rules::aggregation_for;

const METRIC_STAGE: &str = "GetMetricStatistics";

/// Turn raw samples of one metric into datapoints, one per sample, using the
/// metric's aggregation rule. Provider order is kept.
pub fn reduce_samples(metric_name: &str, samples: &[RawSample]) -> Vec<Datapoint> {
    let statistic = aggregation_for(metric_name);
    samples
        .iter()
        .map(|sample| Datapoint {
            metric_name: metric_name.to_string(),
            value: sample.value(statistic),
            timestamp: sample.timestamp,
        })
        .collect()
}

/// Fetch every metric for one resource and concatenate the reduced series in
/// metric order. An empty `metric_names` means the kind's default set.
/// Any failing metric fails the whole call.
pub async fn fetch_and_reduce<M: MetricProvider>(
    provider: &M,
    kind: ResourceKind,
    resource_name: &str,
    metric_names: &[String],
    window: &MetricWindow,
) -> Result<DatapointSeries, ReportError> {
    let profile = kind.profile();
    let names: Vec<&str> = if metric_names.is_empty() {
        profile.default_metrics.to_vec()
    } else {
        metric_names.iter().map(String::as_str).collect()
    };

    let mut series = DatapointSeries::default();
    for name in names {
        let query = StatisticsQuery {
            namespace: profile.namespace.to_string(),
            metric_name: name.to_string(),
            dimensions: vec![(profile.dimension.to_string(), resource_name.to_string())],
            window: window.clone(),
            statistics: vec![Statistic::Sum, Statistic::Maximum, Statistic::Average],
        };
        let samples = provider
            .get_statistics(&query)
            .await
            .map_err(|e| ReportError::fetch(METRIC_STAGE, e))?;
        debug!("{} [{}]: {} sample(s)", name, resource_name, samples.len());
        series.extend(reduce_samples(name, &samples));
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::providers::fake::FakeMetrics;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, minute, 0).unwrap()
    }

    fn sample(minute: u32, sum: f64, average: f64, maximum: f64) -> RawSample {
        RawSample {
            timestamp: at(minute),
            sum: Some(sum),
            average: Some(average),
            maximum: Some(maximum),
        }
    }

    #[test]
    fn sum_metric_uses_per_period_sum() {
        let samples = vec![sample(0, 5.0, 1.0, 2.0), sample(5, 3.0, 1.0, 2.0)];
        let points = reduce_samples("ConsumedReadCapacityUnits", &samples);
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![5.0, 3.0]);
        assert_eq!(points[0].timestamp, at(0));
        assert_eq!(points[1].timestamp, at(5));
    }

    #[test]
    fn average_metric_uses_mean() {
        let points = reduce_samples("SuccessfulRequestLatency", &[sample(0, 90.0, 4.5, 12.0)]);
        assert_eq!(points[0].value, 4.5);
    }

    #[test]
    fn other_metrics_use_maximum() {
        let points = reduce_samples("ApproximateNumberOfMessagesVisible", &[sample(0, 90.0, 4.5, 12.0)]);
        assert_eq!(points[0].value, 12.0);
    }

    #[test]
    fn provider_order_is_not_resorted() {
        let samples = vec![sample(30, 1.0, 1.0, 1.0), sample(0, 2.0, 2.0, 2.0)];
        let points = reduce_samples("UserErrors", &samples);
        assert_eq!(points[0].timestamp, at(30));
        assert_eq!(points[1].timestamp, at(0));
    }

    #[tokio::test]
    async fn empty_metric_contributes_nothing() {
        let provider = FakeMetrics::new(|q| {
            if q.metric_name == "NumberOfMessagesSent" {
                Ok(vec![RawSample {
                    timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
                    sum: None,
                    average: None,
                    maximum: Some(0.0),
                }])
            } else {
                Ok(vec![])
            }
        });
        let window = MetricWindow::live(at(0));
        let series = fetch_and_reduce(&provider, ResourceKind::Queue, "jobs", &[], &window)
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 8);
        assert_eq!(series.len(), 1);
        assert_eq!(series.current_by_metric(), vec![("NumberOfMessagesSent", 0.0)]);
    }

    #[tokio::test]
    async fn explicit_metrics_keep_request_order_and_dimension() {
        let provider = FakeMetrics::new(|_| {
            Ok(vec![RawSample {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
                sum: Some(1.0),
                average: Some(2.0),
                maximum: Some(3.0),
            }])
        });
        let metrics = vec!["UserErrors".to_string(), "ItemCount".to_string()];
        let window = MetricWindow::live(at(0));
        let series = fetch_and_reduce(&provider, ResourceKind::Table, "orders", &metrics, &window)
            .await
            .unwrap();

        assert_eq!(series.current_by_metric(), vec![("UserErrors", 1.0), ("ItemCount", 3.0)]);
        let calls = provider.calls();
        assert_eq!(calls[0].namespace, "AWS/DynamoDB");
        assert_eq!(calls[0].dimension("TableName"), Some("orders"));
        assert_eq!(calls[0].window, window);
    }

    #[tokio::test]
    async fn failing_metric_aborts() {
        let provider = FakeMetrics::new(|q| {
            if q.metric_name == "NumberOfMessagesReceived" {
                anyhow::bail!("Throttling: Rate exceeded")
            }
            Ok(vec![])
        });
        let window = MetricWindow::live(at(0));
        let err = fetch_and_reduce(&provider, ResourceKind::Queue, "jobs", &[], &window)
            .await
            .unwrap_err();

        assert_eq!(provider.call_count(), 3);
        assert!(matches!(err, ReportError::FetchFailed { stage: "GetMetricStatistics", .. }));
    }
}
