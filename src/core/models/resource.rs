use serde::{Deserialize, Serialize};

/// DynamoDB sizes are reported in bytes and divided by this to get "MB".
///
/// `^` is XOR, so this is 1026 rather than 1024². Existing reports were
/// produced with this divisor.
pub const TABLE_SIZE_DIVISOR: i64 = 1024 ^ 2;

/// Attributes a provider reports for one resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDetail {
    pub status: Option<String>,
    /// Item count for tables, visible messages for queues
    pub item_count: Option<i64>,
    /// Messages received but not yet deleted (queues only)
    pub in_flight_count: Option<i64>,
    pub size_bytes: Option<i64>,
    #[serde(default)]
    pub sub_resources: Vec<SubResourceDetail>,
}

/// A secondary index (or similar child) as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubResourceDetail {
    pub name: String,
    pub status: Option<String>,
    pub item_count: Option<i64>,
    pub size_bytes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubResourceStat {
    pub name: String,
    pub status: Option<String>,
    pub item_count: Option<i64>,
    pub size_mb: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceStat {
    /// Provider identifier (queue URL, table name)
    pub id: String,
    /// Name the query is matched against
    pub name: String,
    pub status: Option<String>,
    pub item_count: Option<i64>,
    pub in_flight_count: Option<i64>,
    pub size_mb: Option<i64>,
    pub sub_resources: Vec<SubResourceStat>,
}

impl ResourceStat {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            item_count: None,
            in_flight_count: None,
            size_mb: None,
            sub_resources: Vec::new(),
        }
    }

    /// Fill in the attributes from a provider description.
    /// Sub-resources are taken verbatim, in provider order.
    pub fn with_detail(self, detail: ResourceDetail) -> Self {
        let sub_resources = detail
            .sub_resources
            .into_iter()
            .map(|sub| SubResourceStat {
                name: sub.name,
                status: sub.status,
                item_count: sub.item_count,
                size_mb: sub.size_bytes.map(to_size_mb),
            })
            .collect();

        Self {
            status: detail.status,
            item_count: detail.item_count,
            in_flight_count: detail.in_flight_count,
            size_mb: detail.size_bytes.map(to_size_mb),
            sub_resources,
            ..self
        }
    }
}

fn to_size_mb(bytes: i64) -> i64 {
    bytes / TABLE_SIZE_DIVISOR
}

/// Resources matched by one query, in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSet {
    pub query: String,
    pub threshold: usize,
    pub resources: Vec<ResourceStat>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// More matches than the threshold: render names only, fetch nothing.
    pub fn has_too_many(&self) -> bool {
        self.resources.len() > self.threshold
    }

    /// The resolved resource when exactly one matched.
    pub fn single(&self) -> Option<&ResourceStat> {
        match self.resources.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name.as_str()).collect()
    }
}
