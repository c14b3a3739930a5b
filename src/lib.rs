pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{toml_config::TomlConfig, ServerSettings};

pub use adapters::http::{router, AppState};
pub use adapters::logistic_model::{LogisticModel, ModelArtifact};
pub use crate::core::{
    interpretation::interpret,
    scoring::{calculate_score, to_feature_vector},
    screening::ScreeningEngine,
};
pub use utils::error::{Result, ScreeningError};
