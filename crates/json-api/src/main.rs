//! Sowraashi JSON API Server

use std::process;

use jiff::SignedDuration;
use salvo::{
    affix_state::inject,
    catch_panic::CatchPanic,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Cors},
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    serve_static::StaticDir,
    trailing_slash::remove_slash,
};
use tokio::fs;
use tracing::{debug, error, info, warn};

use sowraashi_app::{
    auth::{AuthServiceError, Password, Role, SeedUser, TokenIssuer},
    context::AppContext,
};

use crate::{
    config::{ServerConfig, auth::AuthConfig, http::HttpConfig},
    observability::Observability,
    state::State,
    uploads::UploadStore,
};

mod auth;
mod config;
mod extensions;
mod forms;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod responses;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod uploads;

/// Sowraashi JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let addr = config.socket_addr();

    let tokens = TokenIssuer::new(
        config.auth.jwt_secret.as_bytes(),
        SignedDuration::from_hours(config.auth.jwt_ttl_hours),
    );

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.pool_settings(),
        tokens,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    if let Err(seed_error) = seed_users(&app, &config.auth).await {
        error!("failed to seed users: {seed_error}");

        process::exit(1);
    }

    if let Err(io_error) = fs::create_dir_all(&config.uploads.upload_path).await {
        error!(
            path = %config.uploads.upload_path.display(),
            "failed to create upload directory: {io_error}"
        );

        process::exit(1);
    }

    let uploads = UploadStore::new(
        config.uploads.upload_path.clone(),
        config.uploads.max_file_size,
    );

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::shared(app, uploads)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(router::app_router(&config.http));

    let doc = OpenApi::new("Sowraashi API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("uploads/{**path}")
                .get(StaticDir::new(vec![config.uploads.upload_path.clone()])),
        )
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let service = Service::new(router).hoop(cors(&config.http));

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(service).await;

    observability.shutdown();
}

fn cors(http: &HttpConfig) -> impl Handler {
    let origins = http.cors_origin.iter().filter_map(|origin| {
        HeaderValue::from_str(origin.trim())
            .inspect_err(|error| warn!(%origin, "ignoring invalid CORS origin: {error}"))
            .ok()
    });

    Cors::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([AUTHORIZATION, CONTENT_TYPE]))
        .allow_credentials(true)
        .into_handler()
}

/// Create the configured admin and designer accounts when they are missing.
async fn seed_users(app: &AppContext, config: &AuthConfig) -> Result<(), AuthServiceError> {
    let seeds = [
        (
            Role::Admin,
            &config.admin_username,
            config.admin_password.as_ref(),
            &config.admin_name,
        ),
        (
            Role::Designer,
            &config.designer_username,
            config.designer_password.as_ref(),
            &config.designer_name,
        ),
    ];

    for (role, username, password, name) in seeds {
        let Some(password) = password else {
            debug!(%role, %username, "no password configured, skipping seed user");

            continue;
        };

        let seed = SeedUser {
            username: username.clone(),
            password: Password::new(password.clone()),
            role,
            name: name.clone(),
            email: None,
        };

        if app.auth.ensure_user(seed).await? {
            info!(%role, %username, "created seed user");
        }
    }

    Ok(())
}
