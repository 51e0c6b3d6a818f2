use serde::{Deserialize, Serialize};

/// Pagination envelope shared by the list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u32>,
}

impl Pagination {
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or_else(|| {
            if self.limit == 0 {
                1
            } else {
                ((self.total + self.limit as u64 - 1) / self.limit as u64).max(1) as u32
            }
        })
    }
}

/// Build a query string from pre-stringified pairs, skipping `None` values.
pub(crate) fn query_string(pairs: &[(&str, Option<String>)]) -> String {
    let mut qs = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if let Some(value) = value {
            qs.append_pair(key, value);
        }
    }
    qs.finish()
}
