use serde::{Deserialize, Serialize};

/// Identity of a model in the catalog API.
pub type ModelId = u64;

/// One catalog entry as served by `GET /api/models`.
///
/// Optional fields accept both a missing key and an explicit `null`.
/// A missing numeric value means "not applicable", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: ModelId,
    pub name: String,
    #[serde(default)]
    pub developer: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    /// Parameter count in millions.
    #[serde(default)]
    pub parameter_count: Option<u64>,
    #[serde(default)]
    pub architecture_type: Option<String>,
    #[serde(default)]
    pub training_data_size: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub use_cases: Option<String>,
    #[serde(default)]
    pub provider_id: Option<u64>,
    #[serde(default)]
    pub provider_name: String,
    #[serde(default)]
    pub provider_website: Option<String>,
    #[serde(default)]
    pub provider_logo: Option<String>,
    #[serde(default)]
    pub context_size: Option<u64>,
    #[serde(default)]
    pub license: Option<String>,
}

impl ModelRecord {
    /// License with blank strings folded into "unspecified".
    pub fn license_name(&self) -> Option<&str> {
        non_blank(self.license.as_deref())
    }

    pub fn release_date_text(&self) -> Option<&str> {
        non_blank(self.release_date.as_deref())
    }
}

/// One benchmark score belonging to a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub model_id: Option<ModelId>,
    pub benchmark_name: String,
    pub score: f64,
    #[serde(default)]
    pub dataset_details: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
