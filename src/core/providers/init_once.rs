use std::future::Future;
use tokio::sync::OnceCell;

use crate::core::error::ReportError;

/// A provider client created on first use and kept for the process lifetime.
/// Only one connect attempt ever runs; its error is kept and handed to every caller.
pub struct InitOnce<T> {
    client: &'static str,
    cell: OnceCell<Result<T, String>>,
}

impl<T> InitOnce<T> {
    pub fn new(client: &'static str) -> Self {
        Self {
            client,
            cell: OnceCell::new(),
        }
    }

    pub async fn get_or_connect<F, Fut>(&self, connect: F) -> Result<&T, ReportError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let state = self
            .cell
            .get_or_init(|| async { connect().await.map_err(|e| format!("{:#}", e)) })
            .await;
        state
            .as_ref()
            .map_err(|message| ReportError::ProviderUnavailable {
                client: self.client.to_string(),
                message: message.clone(),
            })
    }
}
