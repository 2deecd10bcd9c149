//! CORS middleware configuration for cross-origin requests.
//!
//! Development gets a permissive policy for easy local testing; production
//! restricts origins to the comma-separated `ALLOWED_ORIGINS` list.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use mo_shared::config::Environment;

/// Creates a CORS middleware instance configured for the current environment.
///
/// # Environment Variables
/// - `APP_ENV`: Set to "production" for production settings
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors() -> Cors {
    let max_age = std::env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(3600);

    if Environment::from_env().is_production() {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(max_age)
}

fn create_production_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for production environment");

    let allowed_origins = std::env::var("ALLOWED_ORIGINS").unwrap_or_default();

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(max_age);

    for origin in allowed_origins.split(',').filter(|o| !o.trim().is_empty()) {
        cors = cors.allowed_origin(origin.trim());
    }

    cors
}
