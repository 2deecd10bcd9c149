use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use mo_core::services::otp::{OtpService, OtpServiceConfig};
use mo_infra::mail::{create_mailer, AnyMailer};
use mo_infra::store::MemoryChallengeStore;
use mo_shared::config::AppConfig;

mod dto;
mod handlers;
mod middleware;
mod routes;

use routes::otp::{otp_scope, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting MailOtp API Server");

    // Load configuration
    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);
    info!(
        "OTP policy: ttl={}s, max_attempts={}",
        config.otp.ttl_seconds, config.otp.max_attempts
    );

    // Wire the store and mailer into the OTP service
    let store = Arc::new(MemoryChallengeStore::new());
    let mailer = Arc::new(create_mailer(&config.mail));
    let otp_service = Arc::new(OtpService::new(
        store,
        mailer,
        OtpServiceConfig::from(&config.otp),
    ));

    let state = web::Data::new(AppState {
        otp_service: Arc::clone(&otp_service),
    });

    HttpServer::new(move || {
        let cors = middleware::cors::create_cors();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            // Health check endpoint
            .route("/health", web::get().to(health_check))
            // API v1 routes
            .service(
                web::scope("/api/v1").service(otp_scope::<MemoryChallengeStore, AnyMailer>()),
            )
            // Default 404 handler
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": "not_found",
                    "message": "The requested resource was not found"
                }))
            }))
    })
    .bind(&bind_address)?
    .run()
    .await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "mailotp-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
