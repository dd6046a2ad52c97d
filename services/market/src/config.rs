/// Market service configuration loaded from environment variables.
#[derive(Debug)]
pub struct MarketConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// Base URL of the JSON mail relay (e.g. "http://mail-relay:8025").
    pub mail_relay_url: String,
    /// From address on outbound mail.
    pub mail_from: String,
    /// Identity allowed to log in without the emailed second factor.
    /// Unset disables the bypass. Env var: `ADMIN_BYPASS_EMAIL`.
    pub admin_bypass_email: Option<String>,
    /// Email suffix that forces the student role at registration
    /// (default "@unicauca.edu.co"). Env var: `STUDENT_EMAIL_SUFFIX`.
    pub student_email_suffix: String,
    /// TCP port to listen on (default 3100). Env var: `MARKET_PORT`.
    pub market_port: u16,
}

impl MarketConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            mail_relay_url: std::env::var("MAIL_RELAY_URL").expect("MAIL_RELAY_URL"),
            mail_from: std::env::var("MAIL_FROM").expect("MAIL_FROM"),
            admin_bypass_email: std::env::var("ADMIN_BYPASS_EMAIL").ok(),
            student_email_suffix: std::env::var("STUDENT_EMAIL_SUFFIX")
                .unwrap_or_else(|_| "@unicauca.edu.co".to_owned()),
            market_port: std::env::var("MARKET_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3100),
        }
    }
}
