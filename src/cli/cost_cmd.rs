use anyhow::Result;

use crate::cli::output::{self, OutputOptions};
use crate::core::config::AppConfig;
use crate::core::i18n::Lang;
use crate::core::pipeline::OutboundMessage;

/// `--service` flags win over `[cost] services`.
fn services(config: &AppConfig, flags: Vec<String>) -> Vec<String> {
    if flags.is_empty() {
        config.cost.services.clone()
    } else {
        flags
    }
}

#[cfg(feature = "aws")]
async fn collect(date: &str, services: &[String], lang: Lang) -> Vec<OutboundMessage> {
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
        .run_cost_report(date, services)
        .await
}

#[cfg(not(feature = "aws"))]
async fn collect(_date: &str, _services: &[String], _lang: Lang) -> Vec<OutboundMessage> {
    vec![OutboundMessage::Error(crate::cli::aws_disabled())]
}

/// Returns true when the report ended in an error.
pub async fn run(
    date: Option<String>,
    service_flags: Vec<String>,
    config: &AppConfig,
    lang: Lang,
    opts: &OutputOptions,
) -> Result<bool> {
    let services = services(config, service_flags);
    let messages = collect(date.as_deref().unwrap_or(""), &services, lang).await;
    output::print_messages(&messages, opts)
}
