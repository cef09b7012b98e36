pub mod commands;
pub mod contracts;
pub mod date;
pub mod error;
pub mod ingest;
pub mod money;
pub mod records;
pub mod series;
pub mod settings;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use series::dataset::SalesDataset;
pub use settings::{Settings, SettingsOverrides};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
