use actix_web::{web, App, HttpServer};
use nbgen::{handler, logger, AppState, Config, CorsPolicy, VertexClient};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::LoggerConfig::from_env())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded");
    } else {
        log::debug!("No .env file found, using process environment");
    }

    let config = Config::from_env();
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), config.server.port);
    logger::log_config_info(&config);

    let client = VertexClient::new(config.vertex.clone())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let state = web::Data::new(AppState::new(
        Arc::new(client),
        CorsPolicy::new(config.server.allowed_origins.clone()),
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handler::configure)
    })
    .bind(("0.0.0.0", config.server.port))?
    .run()
    .await
}
