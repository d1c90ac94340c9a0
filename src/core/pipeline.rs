use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::core::billing;
use crate::core::chart;
use crate::core::details;
use crate::core::error::ReportError;
use crate::core::i18n::{Lang, Message};
use crate::core::kind::ResourceKind;
use crate::core::matcher;
use crate::core::metrics;
use crate::core::models::metric::MetricWindow;
use crate::core::providers::{ChartService, MetricProvider, ResourceCatalog};
use crate::core::renderer;

/// One message for the reply channel.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    Text(String),
    Error(ReportError),
}

impl std::fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Error(err) => write!(f, "{}", err),
        }
    }
}

/// Per-request options of a stats report.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Match count above which only names are listed; 0 means the default
    pub max_border: usize,
    /// Metrics to fetch; empty means the kind's default set
    pub metrics: Vec<String>,
    /// Overrides the pipeline's default chart endpoint
    pub chart_endpoint: Option<String>,
}

/// The reporting pipeline over injected providers.
pub struct Pipeline<'a, C, M, G> {
    catalog: &'a C,
    metrics: &'a M,
    charts: &'a G,
    lang: Lang,
    default_chart_endpoint: Option<String>,
    clock: fn() -> DateTime<Utc>,
}

impl<'a, C, M, G> Pipeline<'a, C, M, G>
where
    C: ResourceCatalog,
    M: MetricProvider,
    G: ChartService,
{
    pub fn new(catalog: &'a C, metrics: &'a M, charts: &'a G) -> Self {
        Self {
            catalog,
            metrics,
            charts,
            lang: Lang::default(),
            default_chart_endpoint: None,
            clock: Utc::now,
        }
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn with_default_chart_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.default_chart_endpoint = endpoint;
        self
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Stats for the resources of `kind` whose name contains `query`.
    ///
    /// Emits a progress line, then either a not-found line, a names-only
    /// listing, or the detailed stats. A single resolved resource also gets
    /// its metric summary and, when an endpoint is configured, a chart URL.
    /// A failing stage appends its error and ends the report.
    pub async fn run_stats_report(
        &self,
        kind: ResourceKind,
        query: &str,
        options: &StatsOptions,
    ) -> Vec<OutboundMessage> {
        let mut out = Vec::new();

        let endpoint = chart::resolve_endpoint(
            options.chart_endpoint.as_deref(),
            self.default_chart_endpoint.as_deref(),
        );
        if let Some(url) = endpoint {
            if let Err(e) = chart::validate_endpoint(url, self.lang) {
                out.push(OutboundMessage::Error(e));
                return out;
            }
        }

        out.push(OutboundMessage::Text(
            Message::GettingStats { kind, query }.render(self.lang),
        ));
        if let Err(e) = self.stats_into(kind, query, options, endpoint, &mut out).await {
            warn!("{} report for [{}] failed: {}", kind.command(), query, e);
            out.push(OutboundMessage::Error(e));
        }
        out
    }

    async fn stats_into(
        &self,
        kind: ResourceKind,
        query: &str,
        options: &StatsOptions,
        endpoint: Option<&str>,
        out: &mut Vec<OutboundMessage>,
    ) -> Result<(), ReportError> {
        let profile = kind.profile();
        let universe = self
            .catalog
            .list(kind)
            .await
            .map_err(|e| ReportError::fetch(profile.list_stage, e))?;

        let matched = matcher::match_resources(kind, query, &universe, options.max_border);
        info!(
            "[{}] matched {} of {} {} resource(s)",
            query,
            matched.len(),
            universe.len(),
            kind.command()
        );

        if matched.is_empty() {
            out.push(OutboundMessage::Text(
                Message::NoMatch { kind, query }.render(self.lang),
            ));
            return Ok(());
        }
        if matched.has_too_many() {
            debug!("Over {} matches, listing names: {:?}", matched.threshold, matched.names());
            out.push(OutboundMessage::Text(renderer::render_names(&matched)));
            return Ok(());
        }

        let matched = details::fetch_details(self.catalog, kind, matched).await?;
        out.push(OutboundMessage::Text(renderer::render_stats(kind, &matched)));

        let Some(resource) = matched.single() else {
            return Ok(());
        };

        let window = MetricWindow::live((self.clock)());
        let series = metrics::fetch_and_reduce(
            self.metrics,
            kind,
            &resource.name,
            &options.metrics,
            &window,
        )
        .await?;
        if series.is_empty() {
            debug!("No datapoints for [{}]", resource.name);
            return Ok(());
        }
        out.push(OutboundMessage::Text(renderer::render_metric_summary(
            &resource.name,
            &series,
        )));

        let Some(endpoint) = endpoint else {
            return Ok(());
        };
        let title = Message::ChartTitle {
            kind,
            name: &resource.name,
        }
        .render(self.lang);
        if let Some(url) = chart::maybe_render_chart(self.charts, &series, endpoint, &title).await? {
            out.push(OutboundMessage::Text(url));
        }
        Ok(())
    }

    /// Daily cost report for `date_text` (`YYYY-MM-DD`, blank for yesterday).
    /// An empty `services` list reports the default services.
    pub async fn run_cost_report(&self, date_text: &str, services: &[String]) -> Vec<OutboundMessage> {
        let today = (self.clock)().date_naive();
        let end_date = match billing::parse_report_date(date_text, today, self.lang) {
            Ok(date) => date,
            Err(e) => return vec![OutboundMessage::Error(e)],
        };

        let date_label = end_date.format("%Y-%m-%d").to_string();
        let mut out = vec![OutboundMessage::Text(
            Message::GettingCosts { date: &date_label }.render(self.lang),
        )];

        let services: Vec<String> = if services.is_empty() {
            billing::DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect()
        } else {
            services.to_vec()
        };

        match billing::fetch_all_costs(self.metrics, end_date, &services).await {
            Ok(costs) => out.push(OutboundMessage::Text(renderer::render_cost_report(
                &costs, end_date, self.lang,
            ))),
            Err(e) => {
                warn!("cost report for {} failed: {}", date_label, e);
                out.push(OutboundMessage::Error(e));
            }
        }
        out
    }
}
