use std::path::Path;
use std::sync::Arc;

use aq10_screening::adapters::http;
use aq10_screening::domain::ports::{Classifier, ConfigProvider, LogFormat};
use aq10_screening::utils::{logger, validation::Validate};
use aq10_screening::{CliConfig, LogisticModel, ScreeningEngine, ServerSettings, TomlConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入設定：指定 --config 時以 TOML 為準
    let mut settings = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => {
                if let Err(e) = config.validate() {
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
                ServerSettings::from_provider(&config)
            }
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => ServerSettings::from_provider(&cli),
    };
    if cli.json_logs {
        settings.log_format = LogFormat::Json;
    }

    match settings.log_format() {
        LogFormat::Json => logger::init_json_logger(),
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting AQ-10 screening API");
    if cli.verbose {
        tracing::debug!("Server settings: {:?}", settings);
    }

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let engine = load_engine(&settings);
    let state = http::AppState::new(engine);
    let app = http::router(state, settings.cors_origins());

    let bind_address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    log_banner(&listener.local_addr()?.to_string());

    http::serve(listener, app).await?;
    tracing::info!("Server stopped");
    Ok(())
}

/// 模型載入失敗時仍啟動服務，/predict 回 500，探針回報 model_loaded: false
fn load_engine(settings: &ServerSettings) -> Option<ScreeningEngine> {
    let features_path = settings.features_path().map(Path::new);

    match LogisticModel::load(settings.model_path(), features_path) {
        Ok(model) => {
            tracing::info!("✓ Model and features loaded successfully");
            tracing::info!("✓ Model type: {}", model.model_type());
            match model.feature_names() {
                Some(names) => tracing::info!("✓ Expected features: {:?}", names),
                None => tracing::info!("✓ Expected features: not stored with model"),
            }
            Some(ScreeningEngine::new(Arc::new(model)))
        }
        Err(e) => {
            tracing::error!(
                "✗ Error loading model from '{}': {} (Category: {:?}, Severity: {:?})",
                settings.model_path(),
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            None
        }
    }
}

fn log_banner(address: &str) {
    tracing::info!("🚀 AQ-10 Autism Screening API listening on http://{}", address);
    tracing::info!("📊 Endpoints available:");
    tracing::info!("   - GET  /        → Service status");
    tracing::info!("   - GET  /health  → Check if model is loaded");
    tracing::info!("   - POST /predict → Run inference on questionnaire");
}
