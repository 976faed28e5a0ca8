use crate::{
    adapters::http::app_state::AppState,
    infra::{config::AppConfig, postgres_persistence},
    use_cases::{
        access::AccessUseCases,
        circle::{CircleRepo, CircleUseCases},
    },
};
use std::fs::File;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let postgres_arc = Arc::new(postgres_persistence(&config).await?);

    let access_use_cases = AccessUseCases::new(
        config.jwt_secret.clone(),
        config.jwt_ttl,
        config.expiry_policy,
        config.webapp_url.clone(),
    );
    let circle_use_cases = CircleUseCases::new(postgres_arc as Arc<dyn CircleRepo>);

    Ok(AppState {
        config: Arc::new(config),
        access_use_cases: Arc::new(access_use_cases),
        circle_use_cases: Arc::new(circle_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "memorio=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped when the file cannot be created
    let json_layer = File::create("memorio.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(Mutex::new(file))
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
