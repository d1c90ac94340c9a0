use thiserror::Error;

/// A failed report stage, rendered as one line in the reply channel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("[ERROR]\t[ProviderUnavailable]\t[{client}]\t`{message}`")]
    ProviderUnavailable { client: String, message: String },
    #[error("[ERROR]\t[FetchFailed]\t[{stage}]\t`{message}`")]
    FetchFailed { stage: &'static str, message: String },
    /// Bad user input, already phrased for the user.
    #[error("[ERROR]\t[ValidationFailed]\t`{message}`")]
    ValidationFailed { message: String },
    #[error("[ERROR]\t[ChartFailed]\t`{message}`")]
    ChartFailed { message: String },
}

impl ReportError {
    pub fn fetch(stage: &'static str, err: anyhow::Error) -> Self {
        Self::FetchFailed {
            stage,
            message: format!("{:#}", err),
        }
    }

    pub fn chart(err: anyhow::Error) -> Self {
        Self::ChartFailed {
            message: format!("{:#}", err),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable { .. } => "provider_unavailable",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::ValidationFailed { .. } => "validation_failed",
            Self::ChartFailed { .. } => "chart_failed",
        }
    }
}
