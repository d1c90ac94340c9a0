pub mod config_cmd;
pub mod cost_cmd;
pub mod output;
pub mod stats_cmd;

#[cfg(not(feature = "aws"))]
pub(crate) fn aws_disabled() -> crate::core::error::ReportError {
    crate::core::error::ReportError::ProviderUnavailable {
        client: "aws".to_string(),
        message: "built without the `aws` feature".to_string(),
    }
}
