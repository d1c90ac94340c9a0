use serde::{Deserialize, Serialize};

/// Everything the stats pipeline needs to know about one kind of resource.
#[derive(Debug)]
pub struct KindProfile {
    /// Metric namespace queried for this kind
    pub namespace: &'static str,
    /// Dimension holding the resource name
    pub dimension: &'static str,
    pub default_metrics: &'static [&'static str],
    /// Prefix of the chart title, e.g. "SQS Metrics (Maximum): jobs"
    pub chart_label: &'static str,
    pub list_stage: &'static str,
    pub describe_stage: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Queue,
    Table,
}

impl ResourceKind {
    /// Mention command used to request this report.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Queue => "sqs",
            Self::Table => "dynamodb",
        }
    }

    pub fn profile(&self) -> &'static KindProfile {
        match self {
            Self::Queue => &QUEUE_PROFILE,
            Self::Table => &TABLE_PROFILE,
        }
    }

    /// The part of a provider identifier that queries are matched against.
    /// Queues are listed as URLs and matched on their last path segment.
    pub fn name_of<'a>(&self, id: &'a str) -> &'a str {
        match self {
            Self::Queue => id.rsplit('/').next().unwrap_or(id),
            Self::Table => id,
        }
    }

    pub fn all() -> &'static [ResourceKind] {
        &[ResourceKind::Queue, ResourceKind::Table]
    }
}

static QUEUE_PROFILE: KindProfile = KindProfile {
    namespace: "AWS/SQS",
    dimension: "QueueName",
    default_metrics: &[
        "NumberOfEmptyReceives",
        "NumberOfMessagesDeleted",
        "NumberOfMessagesReceived",
        "NumberOfMessagesSent",
        "ApproximateNumberOfMessagesVisible",
        "ApproximateNumberOfMessagesNotVisible",
        "ApproximateAgeOfOldestMessage",
        "ApproximateNumberOfMessagesDelayed",
    ],
    chart_label: "SQS",
    list_stage: "ListAllQueues",
    describe_stage: "GetQueueAttributes",
};

static TABLE_PROFILE: KindProfile = KindProfile {
    namespace: "AWS/DynamoDB",
    dimension: "TableName",
    default_metrics: &[
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
        "SuccessfulRequestLatency",
        "ProvisionedReadCapacityUnits",
        "ProvisionedWriteCapacityUnits",
        "MaxProvisionedTableReadCapacityUtilization",
        "MaxProvisionedTableWriteCapacityUtilization",
    ],
    chart_label: "DynamoDB",
    list_stage: "ListTables",
    describe_stage: "DescribeTable",
};
