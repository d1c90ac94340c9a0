use anyhow::Result;
use log::debug;

use crate::cli::output::{self, OutputOptions};
use crate::core::config::AppConfig;
use crate::core::i18n::Lang;
use crate::core::kind::ResourceKind;
use crate::core::pipeline::{OutboundMessage, StatsOptions};

/// Command-line values that override the `[sqs]` / `[dynamodb]` config.
#[derive(Debug, Clone, Default)]
pub struct StatsOverrides {
    pub max_border: Option<usize>,
    pub metrics: Vec<String>,
    pub chart_endpoint: Option<String>,
}

pub fn stats_options(kind: ResourceKind, config: &AppConfig, overrides: &StatsOverrides) -> StatsOptions {
    let kc = config.kind_config(kind);
    StatsOptions {
        max_border: overrides.max_border.unwrap_or(kc.max_border),
        metrics: if overrides.metrics.is_empty() {
            kc.metrics.clone()
        } else {
            overrides.metrics.clone()
        },
        chart_endpoint: overrides
            .chart_endpoint
            .clone()
            .or_else(|| kc.chart_endpoint.clone()),
    }
}

#[cfg(feature = "aws")]
async fn collect(
    kind: ResourceKind,
    query: &str,
    options: &StatsOptions,
    config: &AppConfig,
    lang: Lang,
) -> Vec<OutboundMessage> {
    use crate::core::pipeline::Pipeline;
    use crate::core::providers::aws::AwsBackend;
    use crate::core::providers::chart_http::HttpChartService;

    let backend = AwsBackend::new();
    let clients = match backend.clients().await {
        Ok(clients) => clients,
        Err(e) => return vec![OutboundMessage::Error(e)],
    };
    let charts = HttpChartService::new();
    Pipeline::new(clients, clients, &charts)
        .with_lang(lang)
        .with_default_chart_endpoint(config.default_chart_endpoint())
        .run_stats_report(kind, query, options)
        .await
}

#[cfg(not(feature = "aws"))]
async fn collect(
    _kind: ResourceKind,
    _query: &str,
    _options: &StatsOptions,
    _config: &AppConfig,
    _lang: Lang,
) -> Vec<OutboundMessage> {
    vec![OutboundMessage::Error(crate::cli::aws_disabled())]
}

/// Returns true when the report ended in an error.
pub async fn run(
    kind: ResourceKind,
    query: Option<String>,
    overrides: &StatsOverrides,
    config: &AppConfig,
    lang: Lang,
    opts: &OutputOptions,
) -> Result<bool> {
    let query = query.unwrap_or_default();
    let options = stats_options(kind, config, overrides);
    debug!("{} [{}] with {:?}", kind.command(), query, options);

    let messages = collect(kind, query.trim(), &options, config, lang).await;
    output::print_messages(&messages, opts)
}
