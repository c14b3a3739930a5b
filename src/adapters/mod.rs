// Adapters layer: concrete implementations for external systems (model artifacts, http).

pub mod http;
pub mod logistic_model;
