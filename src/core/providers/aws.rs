//! AWS-backed catalog and metric provider.
//!
//! Clients are created once per process from the default credential chain.
//! A failed first attempt is remembered and reported on every later use.

use anyhow::{Context, Result};
use aws_sdk_cloudwatch::primitives::DateTime as AwsDateTime;
use aws_sdk_cloudwatch::types::{Dimension, Statistic as AwsStatistic};
use aws_sdk_sqs::types::QueueAttributeName;
use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::core::error::ReportError;
use crate::core::kind::ResourceKind;
use crate::core::models::metric::{RawSample, Statistic, StatisticsQuery};
use crate::core::models::resource::{ResourceDetail, SubResourceDetail};
use crate::core::providers::init_once::InitOnce;
use crate::core::providers::{MetricProvider, ResourceCatalog};

const CLIENT_NAME: &str = "aws";

#[derive(Clone)]
pub struct AwsClients {
    sqs: aws_sdk_sqs::Client,
    dynamodb: aws_sdk_dynamodb::Client,
    cloudwatch: aws_sdk_cloudwatch::Client,
}

impl AwsClients {
    async fn connect() -> Result<Self> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        if config.region().is_none() {
            anyhow::bail!("no AWS region configured (set AWS_REGION or a profile region)");
        }
        info!(
            "AWS clients ready for region {}",
            config.region().map(|r| r.to_string()).unwrap_or_default()
        );
        Ok(Self {
            sqs: aws_sdk_sqs::Client::new(&config),
            dynamodb: aws_sdk_dynamodb::Client::new(&config),
            cloudwatch: aws_sdk_cloudwatch::Client::new(&config),
        })
    }

    async fn list_queues(&self) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let response = self
                .sqs
                .list_queues()
                .max_results(1000)
                .set_next_token(next_token.take())
                .send()
                .await
                .context("Failed to list SQS queues")?;
            urls.extend(response.queue_urls().iter().cloned());
            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }
        Ok(urls)
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut start: Option<String> = None;
        loop {
            let response = self
                .dynamodb
                .list_tables()
                .set_exclusive_start_table_name(start.take())
                .send()
                .await
                .context("Failed to list DynamoDB tables")?;
            names.extend(response.table_names().iter().cloned());
            match response.last_evaluated_table_name() {
                Some(last) => start = Some(last.to_string()),
                None => break,
            }
        }
        Ok(names)
    }

    async fn describe_queue(&self, url: &str) -> Result<ResourceDetail> {
        let response = self
            .sqs
            .get_queue_attributes()
            .queue_url(url)
            .attribute_names(QueueAttributeName::ApproximateNumberOfMessages)
            .attribute_names(QueueAttributeName::ApproximateNumberOfMessagesNotVisible)
            .send()
            .await
            .with_context(|| format!("Failed to get attributes of {}", url))?;

        let count = |name: &QueueAttributeName| {
            response
                .attributes()
                .and_then(|attrs| attrs.get(name))
                .and_then(|v| v.parse::<i64>().ok())
        };
        Ok(ResourceDetail {
            item_count: count(&QueueAttributeName::ApproximateNumberOfMessages),
            in_flight_count: count(&QueueAttributeName::ApproximateNumberOfMessagesNotVisible),
            ..ResourceDetail::default()
        })
    }

    async fn describe_table(&self, name: &str) -> Result<ResourceDetail> {
        let response = self
            .dynamodb
            .describe_table()
            .table_name(name)
            .send()
            .await
            .with_context(|| format!("Failed to describe table {}", name))?;
        let Some(table) = response.table() else {
            anyhow::bail!("DescribeTable returned no table for {}", name);
        };

        let sub_resources = table
            .global_secondary_indexes()
            .iter()
            .map(|index| SubResourceDetail {
                name: index.index_name().unwrap_or_default().to_string(),
                status: index.index_status().map(|s| s.as_str().to_string()),
                item_count: index.item_count(),
                size_bytes: index.index_size_bytes(),
            })
            .collect();

        Ok(ResourceDetail {
            status: table.table_status().map(|s| s.as_str().to_string()),
            item_count: table.item_count(),
            in_flight_count: None,
            size_bytes: table.table_size_bytes(),
            sub_resources,
        })
    }
}

impl ResourceCatalog for AwsClients {
    async fn list(&self, kind: ResourceKind) -> Result<Vec<String>> {
        let ids = match kind {
            ResourceKind::Queue => self.list_queues().await?,
            ResourceKind::Table => self.list_tables().await?,
        };
        debug!("Listed {} {} resource(s)", ids.len(), kind.command());
        Ok(ids)
    }

    async fn describe(&self, kind: ResourceKind, id: &str) -> Result<ResourceDetail> {
        match kind {
            ResourceKind::Queue => self.describe_queue(id).await,
            ResourceKind::Table => self.describe_table(id).await,
        }
    }
}

fn to_aws_statistic(statistic: Statistic) -> AwsStatistic {
    match statistic {
        Statistic::Sum => AwsStatistic::Sum,
        Statistic::Average => AwsStatistic::Average,
        Statistic::Maximum => AwsStatistic::Maximum,
    }
}

fn to_aws_time(time: DateTime<Utc>) -> AwsDateTime {
    AwsDateTime::from_secs(time.timestamp())
}

impl MetricProvider for AwsClients {
    async fn get_statistics(&self, query: &StatisticsQuery) -> Result<Vec<RawSample>> {
        let mut request = self
            .cloudwatch
            .get_metric_statistics()
            .namespace(&query.namespace)
            .metric_name(&query.metric_name)
            .start_time(to_aws_time(query.window.start))
            .end_time(to_aws_time(query.window.end))
            .period(query.window.period_secs);
        for (name, value) in &query.dimensions {
            request = request.dimensions(Dimension::builder().name(name).value(value).build());
        }
        for statistic in &query.statistics {
            request = request.statistics(to_aws_statistic(*statistic));
        }

        let response = request.send().await.with_context(|| {
            format!("Failed to get {} statistics of {}", query.namespace, query.metric_name)
        })?;

        let samples = response
            .datapoints()
            .iter()
            .filter_map(|point| {
                let ts = point.timestamp()?;
                let timestamp = DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())?;
                Some(RawSample {
                    timestamp,
                    sum: point.sum(),
                    average: point.average(),
                    maximum: point.maximum(),
                })
            })
            .collect();
        Ok(samples)
    }
}

/// Lazily connected AWS clients.
pub struct AwsBackend {
    clients: InitOnce<AwsClients>,
}

impl AwsBackend {
    pub fn new() -> Self {
        Self {
            clients: InitOnce::new(CLIENT_NAME),
        }
    }

    /// Connect on first use. Later calls reuse the clients, or the first error.
    pub async fn clients(&self) -> Result<&AwsClients, ReportError> {
        self.clients.get_or_connect(AwsClients::connect).await
    }
}
