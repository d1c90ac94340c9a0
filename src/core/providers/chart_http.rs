use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::chart::ChartRequest;
use crate::core::providers::ChartService;

#[derive(Deserialize)]
struct ChartResponse {
    html_url: String,
}

fn parse_chart_response(body: &str) -> Result<String> {
    let data: ChartResponse =
        serde_json::from_str(body).context("Failed to parse chart service response")?;
    if data.html_url.is_empty() {
        anyhow::bail!("Chart service returned an empty html_url");
    }
    Ok(data.html_url)
}

/// Chart service reached over HTTP with a JSON POST.
#[derive(Clone, Default)]
pub struct HttpChartService {
    client: reqwest::Client,
}

impl HttpChartService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartService for HttpChartService {
    async fn create_chart(&self, endpoint: &str, request: &ChartRequest) -> Result<String> {
        let response = self
            .client
            .post(endpoint)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .context("Failed to send request to chart service")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("HTTP {} from chart endpoint: {}", status.as_u16(), body);
        }

        let body = response
            .text()
            .await
            .context("Failed to read chart service response")?;
        parse_chart_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_response_with_url() {
        let body = r#"{"html_url": "https://chart.example.com/c/abc", "id": 7}"#;
        assert_eq!(
            parse_chart_response(body).unwrap(),
            "https://chart.example.com/c/abc"
        );
    }

    #[test]
    fn parse_response_missing_url() {
        let err = parse_chart_response(r#"{"id": 7}"#).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse chart service response"));
    }

    #[test]
    fn parse_response_not_json() {
        assert!(parse_chart_response("<html>bad gateway</html>").is_err());
    }

    #[test]
    fn parse_response_empty_url() {
        let err = parse_chart_response(r#"{"html_url": ""}"#).unwrap_err();
        assert!(err.to_string().contains("empty html_url"));
    }
}
