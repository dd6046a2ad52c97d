use sea_orm::Database;
use tracing::info;

use campus_market::config::MarketConfig;
use campus_market::infra::email::RelayMailer;
use campus_market::router::build_router;
use campus_market::state::AppState;
use campus_market::usecase::auth::AuthPolicy;

#[tokio::main]
async fn main() {
    campus_core::tracing::init_tracing();

    let config = MarketConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = RelayMailer::new(&config.mail_relay_url, &config.mail_from);

    let state = AppState {
        db,
        mailer,
        jwt_secret: config.jwt_secret.clone(),
        policy: AuthPolicy {
            bypass_identity: config.admin_bypass_email.clone(),
            student_suffix: config.student_email_suffix.clone(),
        },
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.market_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("market service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
