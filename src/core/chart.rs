use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::error::ReportError;
use crate::core::i18n::{Lang, Message};
use crate::core::models::metric::DatapointSeries;
use crate::core::providers::ChartService;

/// Process-wide default chart endpoint.
pub const CHART_ENDPOINT_ENV: &str = "CHART_ANGEL_ENDPOINT";

/// Timestamp label used as the x-axis key.
const TIMESTAMP_LABEL: &str = "%Y-%m-%d %H:%M:%S";

/// JSON body accepted by the chart service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub title: String,
    pub label_x: String,
    pub label_y: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    /// metric name -> timestamp label -> value
    pub data: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ChartRequest {
    /// Line chart of `series`, one category per metric.
    /// Points of one metric sharing a timestamp label keep the last value.
    pub fn line(title: &str, series: &DatapointSeries) -> Self {
        let mut data: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for point in series {
            data.entry(point.metric_name.clone())
                .or_default()
                .insert(point.timestamp.format(TIMESTAMP_LABEL).to_string(), point.value);
        }

        Self {
            title: title.to_string(),
            label_x: "time".to_string(),
            label_y: "value".to_string(),
            chart_type: "line".to_string(),
            data,
        }
    }
}

/// Pick the explicit endpoint, else the default. Blank strings count as unset.
pub fn resolve_endpoint<'a>(explicit: Option<&'a str>, default: Option<&'a str>) -> Option<&'a str> {
    explicit
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .or_else(|| default.map(str::trim).filter(|url| !url.is_empty()))
}

/// Reject chart endpoints that are not absolute http(s) URLs.
pub fn validate_endpoint(url: &str, lang: Lang) -> Result<(), ReportError> {
    let invalid = || ReportError::ValidationFailed {
        message: Message::InvalidChartEndpoint { url }.render(lang),
    };
    let parsed = reqwest::Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(invalid());
    }
    Ok(())
}

/// Post `series` to the chart service and return the chart URL.
/// Returns `None` without calling the service when there is nothing to draw.
pub async fn maybe_render_chart<G: ChartService>(
    charts: &G,
    series: &DatapointSeries,
    endpoint: &str,
    title: &str,
) -> Result<Option<String>, ReportError> {
    if series.is_empty() {
        debug!("No datapoints for chart [{}], skipping", title);
        return Ok(None);
    }

    let request = ChartRequest::line(title, series);
    info!(
        "Creating chart [{}] with {} metric(s) at {}",
        title,
        request.data.len(),
        endpoint
    );
    let url = charts
        .create_chart(endpoint, &request)
        .await
        .map_err(ReportError::chart)?;
    Ok(Some(url))
}
