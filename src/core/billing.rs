//! Daily cost from cumulative month-to-date billing readings.

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use log::{debug, info};
use std::collections::HashMap;

use crate::core::error::ReportError;
use crate::core::i18n::{Lang, Message};
use crate::core::models::cost::CostBreakdown;
use crate::core::models::metric::{MetricWindow, Statistic, StatisticsQuery};
use crate::core::providers::MetricProvider;

const BILLING_NAMESPACE: &str = "AWS/Billing";
const BILLING_METRIC: &str = "EstimatedCharges";
const BILLING_CURRENCY: &str = "USD";
const DAY_SECS: i32 = 86_400;
const COST_STAGE: &str = "fetchAllCosts";

/// Services reported when none are configured.
pub static DEFAULT_SERVICES: &[&str] = &[
    "AmazonApiGateway",
    "AmazonCloudWatch",
    "AmazonEC2",
    "AmazonECR",
    "AmazonDynamoDB",
    "AmazonElastiCache",
    "AmazonES",
    "AmazonGuardDuty",
    "AmazonInspector",
    "AmazonKinesis",
    "AmazonKinesisFirehose",
    "AmazonRDS",
    "AmazonRekognition",
    "AmazonRoute53",
    "AmazonS3",
    "AmazonSageMaker",
    "AmazonSES",
    "AmazonSNS",
    "AWSDataTransfer",
    "AWSIoT",
    "AWSLambda",
    "AWSQueueService",
    "CodeBuild",
];

/// 23:59:59 UTC on `date`.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    (date.and_time(NaiveTime::MIN) + Duration::seconds(i64::from(DAY_SECS) - 1)).and_utc()
}

/// Parse a `YYYY-MM-DD` report date. Blank input means the day before `today`.
pub fn parse_report_date(text: &str, today: NaiveDate, lang: Lang) -> Result<NaiveDate, ReportError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(today - Duration::days(1));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| ReportError::ValidationFailed {
        message: Message::InvalidDate { text }.render(lang),
    })
}

/// Month-to-date reading as of `end`. No samples reads as zero.
async fn cumulative_reading<M: MetricProvider>(
    provider: &M,
    end: DateTime<Utc>,
    service: Option<&str>,
) -> Result<f64> {
    let mut dimensions = vec![("Currency".to_string(), BILLING_CURRENCY.to_string())];
    if let Some(service) = service {
        dimensions.push(("ServiceName".to_string(), service.to_string()));
    }

    let query = StatisticsQuery {
        namespace: BILLING_NAMESPACE.to_string(),
        metric_name: BILLING_METRIC.to_string(),
        dimensions,
        window: MetricWindow {
            start: end - Duration::days(1),
            end,
            period_secs: DAY_SECS,
        },
        statistics: vec![Statistic::Maximum],
    };

    let samples = provider.get_statistics(&query).await?;
    Ok(samples
        .first()
        .map(|s| s.value(Statistic::Maximum))
        .unwrap_or(0.0))
}

/// Cost incurred on `end_date` alone, for the account or one service.
///
/// Billing readings reset at the start of each month, so the 1st reports the
/// raw reading and every other day subtracts the previous day's reading.
pub async fn daily_cost<M: MetricProvider>(
    provider: &M,
    end_date: NaiveDate,
    service: Option<&str>,
) -> Result<f64> {
    let today = cumulative_reading(provider, end_of_day(end_date), service).await?;
    if end_date.day() == 1 {
        return Ok(today);
    }

    let previous = end_date - Duration::days(1);
    let yesterday = cumulative_reading(provider, end_of_day(previous), service).await?;
    debug!(
        "{} {}: {} - {}",
        end_date,
        service.unwrap_or("(total)"),
        today,
        yesterday
    );
    Ok(today - yesterday)
}

/// Account total, each requested service, and the remainder. Any failing
/// reading fails the whole breakdown.
pub async fn fetch_all_costs<M: MetricProvider>(
    provider: &M,
    end_date: NaiveDate,
    services: &[String],
) -> Result<CostBreakdown, ReportError> {
    let total = daily_cost(provider, end_date, None)
        .await
        .map_err(|e| ReportError::fetch(COST_STAGE, e))?;

    let mut costs = HashMap::with_capacity(services.len());
    for service in services {
        let cost = daily_cost(provider, end_date, Some(service))
            .await
            .map_err(|e| ReportError::fetch(COST_STAGE, e))?;
        costs.insert(service.clone(), cost);
    }

    let breakdown = CostBreakdown::new(total, costs);
    info!(
        "Costs on {}: total ${:.2}, other ${:.2} across {} service(s)",
        end_date,
        breakdown.total,
        breakdown.other,
        breakdown.services.len()
    );
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::metric::RawSample;
    use crate::core::providers::fake::FakeMetrics;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Cumulative readings keyed by (day of month, service).
    fn provider(readings: &'static [(u32, Option<&'static str>, f64)]) -> FakeMetrics {
        FakeMetrics::new(move |q| {
            let day = q.window.end.day();
            let service = q.dimension("ServiceName");
            Ok(readings
                .iter()
                .filter(|(d, s, _)| *d == day && *s == service)
                .map(|(_, _, value)| RawSample {
                    timestamp: q.window.end,
                    sum: None,
                    average: None,
                    maximum: Some(*value),
                })
                .collect())
        })
    }

    #[test]
    fn end_of_day_is_last_second_utc() {
        assert_eq!(
            end_of_day(date(2024, 3, 15)),
            Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn blank_date_means_yesterday() {
        let today = date(2024, 3, 1);
        assert_eq!(parse_report_date("", today, Lang::English).unwrap(), date(2024, 2, 29));
        assert_eq!(parse_report_date("  ", today, Lang::English).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn explicit_date_is_parsed() {
        let today = date(2024, 3, 20);
        assert_eq!(
            parse_report_date("2024-03-05", today, Lang::English).unwrap(),
            date(2024, 3, 5)
        );
    }

    #[test]
    fn malformed_date_is_validation_error() {
        let err = parse_report_date("yesterday", date(2024, 3, 20), Lang::English).unwrap_err();
        assert_eq!(
            err,
            ReportError::ValidationFailed {
                message: "Invalid date format: [yesterday]".into()
            }
        );
        assert_eq!(
            err.to_string(),
            "[ERROR]\t[ValidationFailed]\t`Invalid date format: [yesterday]`"
        );
    }

    #[tokio::test]
    async fn daily_cost_subtracts_previous_day() {
        let provider = provider(&[(14, None, 100.0), (15, None, 112.5)]);
        let cost = daily_cost(&provider, date(2024, 3, 15), None).await.unwrap();
        assert!((cost - 12.5).abs() < 1e-10);

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].window.end, Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap());
        assert_eq!(calls[1].window.end, Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 59).unwrap());
        assert_eq!(calls[0].window.period_secs, 86_400);
        assert_eq!(calls[0].namespace, "AWS/Billing");
        assert_eq!(calls[0].metric_name, "EstimatedCharges");
        assert_eq!(calls[0].dimension("Currency"), Some("USD"));
        assert_eq!(calls[0].dimension("ServiceName"), None);
    }

    #[tokio::test]
    async fn first_of_month_returns_raw_reading() {
        let provider = provider(&[(1, None, 7.25), (31, None, 9_999.0)]);
        let cost = daily_cost(&provider, date(2024, 3, 1), None).await.unwrap();
        assert!((cost - 7.25).abs() < 1e-10);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn daily_cost_is_repeatable() {
        let provider = provider(&[(9, None, 40.0), (10, None, 52.0)]);
        let first = daily_cost(&provider, date(2024, 5, 10), None).await.unwrap();
        let second = daily_cost(&provider, date(2024, 5, 10), None).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn missing_samples_read_as_zero() {
        let provider = provider(&[(10, None, 5.0)]);
        let cost = daily_cost(&provider, date(2024, 5, 10), None).await.unwrap();
        assert!((cost - 5.0).abs() < 1e-10);
    }

    #[tokio::test]
    async fn fetch_all_costs_breaks_down_services() {
        let provider = provider(&[
            (14, None, 100.0),
            (15, None, 130.0),
            (14, Some("AmazonEC2"), 50.0),
            (15, Some("AmazonEC2"), 60.0),
            (14, Some("AmazonS3"), 20.0),
            (15, Some("AmazonS3"), 25.0),
        ]);
        let services = vec!["AmazonEC2".to_string(), "AmazonS3".to_string()];
        let costs = fetch_all_costs(&provider, date(2024, 3, 15), &services)
            .await
            .unwrap();

        assert!((costs.total - 30.0).abs() < 1e-10);
        assert!((costs.services["AmazonEC2"] - 10.0).abs() < 1e-10);
        assert!((costs.services["AmazonS3"] - 5.0).abs() < 1e-10);
        assert!((costs.other - 15.0).abs() < 1e-10);
        assert_eq!(provider.call_count(), 6);
    }

    #[tokio::test]
    async fn other_can_be_negative() {
        let provider = provider(&[(1, None, 10.0), (1, Some("AmazonEC2"), 12.0)]);
        let services = vec!["AmazonEC2".to_string()];
        let costs = fetch_all_costs(&provider, date(2024, 4, 1), &services)
            .await
            .unwrap();
        assert!((costs.other + 2.0).abs() < 1e-10);
    }

    #[tokio::test]
    async fn any_failure_aborts_breakdown() {
        let provider = FakeMetrics::new(|q| {
            if q.dimension("ServiceName") == Some("AmazonS3") {
                anyhow::bail!("AccessDenied")
            }
            Ok(vec![])
        });
        let services = vec!["AmazonEC2".to_string(), "AmazonS3".to_string()];
        let err = fetch_all_costs(&provider, date(2024, 3, 15), &services)
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::FetchFailed { stage: "fetchAllCosts", .. }));
    }

    #[test]
    fn default_services_list() {
        assert_eq!(DEFAULT_SERVICES.len(), 23);
        assert!(DEFAULT_SERVICES.contains(&"AmazonEC2"));
    }
}
