use log::debug;

use crate::core::error::ReportError;
use crate::core::kind::ResourceKind;
use crate::core::models::resource::MatchSet;
use crate::core::providers::ResourceCatalog;

/// Describe every matched resource. The first failure aborts the batch and
/// nothing from the partial run is returned.
pub async fn fetch_details<C: ResourceCatalog>(
    catalog: &C,
    kind: ResourceKind,
    set: MatchSet,
) -> Result<MatchSet, ReportError> {
    let stage = kind.profile().describe_stage;
    let MatchSet {
        query,
        threshold,
        resources,
    } = set;

    let mut detailed = Vec::with_capacity(resources.len());
    for stat in resources {
        debug!("Describing {} [{}]", kind.command(), stat.id);
        let detail = catalog
            .describe(kind, &stat.id)
            .await
            .map_err(|e| ReportError::fetch(stage, e))?;
        detailed.push(stat.with_detail(detail));
    }

    Ok(MatchSet {
        query,
        threshold,
        resources: detailed,
    })
}
