use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Trailing window used for live resource metrics.
pub const LIVE_WINDOW_MINUTES: i64 = 300;
/// Sample period for live resource metrics.
pub const LIVE_PERIOD_SECS: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Sum,
    Average,
    Maximum,
}

/// One provider sample. Statistics that were not requested come back as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub timestamp: DateTime<Utc>,
    pub sum: Option<f64>,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
}

impl RawSample {
    pub fn value(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Sum => self.sum,
            Statistic::Average => self.average,
            Statistic::Maximum => self.maximum,
        }
        .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub period_secs: i32,
}

impl MetricWindow {
    pub fn trailing(end: DateTime<Utc>, minutes: i64, period_secs: i32) -> Self {
        Self {
            start: end - Duration::minutes(minutes),
            end,
            period_secs,
        }
    }

    /// The last 300 minutes at 5-minute granularity.
    pub fn live(now: DateTime<Utc>) -> Self {
        Self::trailing(now, LIVE_WINDOW_MINUTES, LIVE_PERIOD_SECS)
    }
}

/// Arguments of a single statistics call against the metric provider.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsQuery {
    pub namespace: String,
    pub metric_name: String,
    /// Dimension name/value pairs, in request order
    pub dimensions: Vec<(String, String)>,
    pub window: MetricWindow,
    pub statistics: Vec<Statistic>,
}

#[cfg(test)]
impl StatisticsQuery {
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datapoint {
    pub metric_name: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Reduced datapoints in fetch order. Never re-sorted by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatapointSeries(Vec<Datapoint>);

impl DatapointSeries {
    pub fn extend(&mut self, points: impl IntoIterator<Item = Datapoint>) {
        self.0.extend(points);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First value of each metric, in the order metrics first appear.
    pub fn current_by_metric(&self) -> Vec<(&str, f64)> {
        let mut seen: Vec<(&str, f64)> = Vec::new();
        for point in &self.0 {
            if !seen.iter().any(|(name, _)| *name == point.metric_name) {
                seen.push((point.metric_name.as_str(), point.value));
            }
        }
        seen
    }
}

impl From<Vec<Datapoint>> for DatapointSeries {
    fn from(points: Vec<Datapoint>) -> Self {
        Self(points)
    }
}

impl<'a> IntoIterator for &'a DatapointSeries {
    type Item = &'a Datapoint;
    type IntoIter = std::slice::Iter<'a, Datapoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
