use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use tycoon_backend::config::db::DbProfile;
use tycoon_backend::config::server::ServerConfig;
use tycoon_backend::infra::state::build_state;
use tycoon_backend::middleware::{cors_middleware, RequestTrace};
use tycoon_backend::routes;
use tycoon_backend::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment comes from the runtime (docker env_file, or a sourced .env locally).
    let server = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };
    let profile = match DbProfile::from_env() {
        Ok(profile) => profile,
        Err(e) => {
            error!(error = %e, "Invalid database configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(profile)
        .with_security(SecurityConfig::new(server.jwt_secret.as_bytes()))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, "Starting Tycoon backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
