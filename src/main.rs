use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use review_sentiment::{config::Config, server, service::SentimentService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    let service = web::Data::new(SentimentService::new(&config));

    // Warm the models up front; a failure is surfaced via /health and every
    // later request re-attempts the load, so startup continues regardless.
    if let Err(e) = service.warm_up() {
        warn!(error = %e, "initial model load failed");
    }

    info!(port = config.port, "starting sentiment server");

    let cors_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(server::cors(&cors_config))
            .app_data(service.clone())
            .configure(server::configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
