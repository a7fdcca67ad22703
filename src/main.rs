use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};

mod api;
mod config;
mod db;
mod docs;
mod model;
mod routes;
mod store;
mod utils;

use config::Config;
use db::init_db;
use store::mongo::MongoStore;

use crate::docs::ApiDoc;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e:#}");
            std::process::exit(1);
        }
    };

    // Rolling daily log alongside stdout
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    info!("Server starting...");

    let database = match init_db(&config).await {
        Ok(database) => database,
        Err(e) => {
            error!(error = %e, "Failed to connect to MongoDB");
            std::process::exit(1);
        }
    };

    // Listening does not wait for the database; an unreachable server is fatal.
    let pinged = database.clone();
    actix_web::rt::spawn(async move {
        match db::ping(&pinged).await {
            Ok(()) => info!(database = pinged.name(), "Connected to MongoDB"),
            Err(e) => {
                error!(error = %e, "Failed to connect to MongoDB");
                std::process::exit(1);
            }
        }
    });

    let store = Data::new(MongoStore::new(&database));
    let openapi = ApiDoc::openapi();

    info!(host = %config.server_host, port = config.port, "Server running");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", openapi.clone()),
            )
            .app_data(store.clone())
            .configure(routes::configure::<MongoStore>)
    })
    .bind((config.server_host.as_str(), config.port))?
    .run()
    .await
}
