use actix_web::{App, HttpServer};
use pm_backend::config::Config;
use pm_backend::middleware::{RequestTrace, StructuredLogger};
use pm_backend::routes;
use pm_backend::TokenCodec;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: env_file in docker-compose or docker run --env-file
    // - Local dev: export them in the shell (e.g., set -a; . ./.env; set +a)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    if config.security.is_fallback() {
        warn!("tokens are signed with the built-in fallback secret; set JWT_SECRET before exposing this server");
    }

    let codec = TokenCodec::new(&config.security);

    info!(host = %config.host, port = config.port, env = ?config.runtime_env, "starting server");

    HttpServer::new(move || {
        let codec = codec.clone();
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .configure(|cfg| routes::configure(cfg, &codec))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
