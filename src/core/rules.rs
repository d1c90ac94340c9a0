//! Which statistic represents each metric over one sample period.
//!
//! Counters are summed, latencies averaged, and everything else (gauges,
//! provisioned capacity, queue depth) takes the maximum seen in the period.

use crate::core::models::metric::Statistic;

static SUM_METRICS: &[&str] = &[
    "ConditionalCheckFailedRequests",
    "ConsumedReadCapacityUnits",
    "ConsumedWriteCapacityUnits",
    "OnlineIndexConsumedWriteCapacity",
    "OnlineIndexPercentageProgress",
    "OnlineIndexThrottleEvents",
    "ReadThrottleEvents",
    "ReturnedItemCount",
    "SystemErrors",
    "TimeToLiveDeletedItemCount",
    "ThrottledRequests",
    "TransactionConflict",
    "UserErrors",
    "WriteThrottleEvents",
];

static AVERAGE_METRICS: &[&str] = &["SuccessfulRequestLatency"];

/// Statistic used to reduce samples of `metric_name`. Unknown metrics use Maximum.
pub fn aggregation_for(metric_name: &str) -> Statistic {
    if SUM_METRICS.contains(&metric_name) {
        Statistic::Sum
    } else if AVERAGE_METRICS.contains(&metric_name) {
        Statistic::Average
    } else {
        Statistic::Maximum
    }
}
