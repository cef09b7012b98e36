use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SourceFileSummary {
    pub path: String,
    pub rows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    pub kind: String,
    pub path: String,
    pub rows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub product: String,
    pub data_dir: String,
    pub files: Vec<SourceFileSummary>,
    pub rows_read: i64,
    pub rows_matched: i64,
    pub data_range: DataRange,
    pub artifacts: Vec<ArtifactSummary>,
    pub dataset_path: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DataRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerData {
    pub date: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOptions {
    pub dataset_path: String,
    pub rows: i64,
    pub metrics: Vec<MetricOption>,
    pub regions: Vec<String>,
    pub data_range: DataRange,
    pub marker: MarkerData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServeData {
    pub address: String,
    pub url: String,
    pub dataset_path: String,
    pub rows: i64,
}
