use std::path::Path;

use aq10_screening::adapters::logistic_model::{FeatureNames, ModelArtifact};
use aq10_screening::utils::logger;
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "inspect-model")]
#[command(about = "Print coefficients, intercept and feature names of an exported model")]
struct Args {
    /// Path to the JSON model artifact
    #[arg(short, long, default_value = "tuned_lr_adult_aq10.json")]
    model: String,

    /// Optional JSON list of feature names saved next to the model
    #[arg(short, long)]
    features: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let artifact = match ModelArtifact::from_file(&args.model) {
        Ok(artifact) => artifact,
        Err(e) => {
            tracing::error!("❌ Failed to load model '{}': {}", args.model, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    println!("Successfully loaded model from '{}'", args.model);

    let feature_names = FeatureNames::resolve(&artifact, args.features.as_deref().map(Path::new))
        .with_context(|| {
            format!(
                "Failed to load feature names from '{}'",
                args.features.as_deref().unwrap_or_default()
            )
        })?;
    if let (FeatureNames::FromFile(_), Some(path)) = (&feature_names, &args.features) {
        println!("Successfully loaded feature names from '{}'", path);
    }

    println!();
    println!("=== MODEL INFORMATION ===");
    println!("Type of loaded model: {}", artifact.model_type);
    println!();
    println!("Coefficients: {:?}", artifact.coefficients());
    println!();
    println!("Intercept: {}", artifact.intercept());
    println!();

    if let Some(names) = feature_names.names() {
        if names.len() != artifact.feature_count() {
            tracing::warn!(
                "Feature name count ({}) does not match coefficient count ({})",
                names.len(),
                artifact.feature_count()
            );
        }
    }
    println!("{}", feature_names);

    Ok(())
}
