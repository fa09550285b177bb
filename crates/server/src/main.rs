//! ChatAI server entry point

use std::net::SocketAddr;
use std::sync::Arc;

use chatai_agent::SupportAgent;
use chatai_config::{load_settings, ConfigStore, Settings};
use chatai_core::Notifier;
use chatai_llm::{OpenAiBackend, OpenAiConfig};
use chatai_server::{create_router, AppState};
use chatai_tools::{HttpBackendGateway, NullNotifier, TelegramNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml.
    let env = std::env::var("CHATAI_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing is not up yet.
            eprintln!("warning: failed to load settings: {e}. Using defaults.");
            Settings::default()
        }
    };

    init_tracing(&settings);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?settings.environment,
        "starting ChatAI server"
    );

    let config = ConfigStore::load(&settings.business_config_path);
    tracing::info!(
        business_types = config.snapshot().businesses.len(),
        "business configuration initialized"
    );

    let llm = Arc::new(OpenAiBackend::new(OpenAiConfig::from(&settings.llm))?);
    let gateway = Arc::new(HttpBackendGateway::new(&settings.gateway)?);

    let notifier: Arc<dyn Notifier> = if settings.telegram.enabled {
        match TelegramNotifier::new(&settings.telegram) {
            Ok(notifier) => {
                tracing::info!("staff notifications via Telegram enabled");
                Arc::new(notifier)
            }
            Err(e) => {
                tracing::warn!(error = %e, "telegram misconfigured, notifications disabled");
                Arc::new(NullNotifier)
            }
        }
    } else {
        tracing::info!("staff notifications disabled");
        Arc::new(NullNotifier)
    };

    let agent = Arc::new(SupportAgent::new(llm, gateway, notifier, config.clone()));
    let state = AppState::new(agent, config, Arc::new(settings.clone()));
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,chatai=debug"));

    // JSON logs in production, human-readable everywhere else.
    if settings.environment.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown signal handler");
    }
    tracing::info!("shutdown signal received");
}
