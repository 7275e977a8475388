//! Plugstore Storefront Server
//!
//! HTTP JSON API serving the product catalog, the admin CMS mutations, and
//! the trial-download email sender.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use plugstore_core::config::SmtpConfig;
use plugstore_core::tracing_init::init_tracing;

use plugstore_server::auth::JwtManager;
use plugstore_server::mailer::Mailer;
use plugstore_server::server::{self, AppState};
use plugstore_server::storage::StoreDatabase;

#[derive(Parser, Debug)]
#[command(name = "plugstore-server")]
#[command(version, about = "Plugstore storefront API - catalog, admin CMS, trial mail")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "PLUGSTORE_ADDR", default_value = "0.0.0.0:8080")]
    addr: SocketAddr,

    /// PostgreSQL connection string. When unset, database-backed endpoints
    /// answer 503 instead of the server refusing to start.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Require TLS on the database connection.
    #[arg(long, env = "DATABASE_SSL")]
    database_ssl: bool,

    /// Signing secret for admin session tokens.
    #[arg(
        long,
        env = "ADMIN_TOKEN_SECRET",
        default_value = "dev-secret-change-me"
    )]
    admin_token_secret: String,

    /// Admin session token TTL in seconds.
    #[arg(long, env = "ADMIN_TOKEN_TTL_SECS", default_value_t = 3600)]
    admin_token_ttl: i64,

    /// SMTP relay host. When unset, the trial-email endpoint answers 503.
    #[arg(long, env = "SMTP_HOST")]
    smtp_host: Option<String>,

    /// SMTP port.
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    smtp_port: u16,

    /// Use implicit TLS (SMTPS) for the SMTP connection.
    #[arg(long, env = "SMTP_SECURE")]
    smtp_secure: bool,

    /// SMTP username.
    #[arg(long, env = "SMTP_USER")]
    smtp_user: Option<String>,

    /// SMTP password.
    #[arg(long, env = "SMTP_PASS")]
    smtp_pass: Option<String>,

    /// From mailbox for outgoing mail.
    #[arg(
        long,
        env = "SMTP_FROM",
        default_value = "Plugstore <no-reply@plugstore.dev>"
    )]
    smtp_from: String,

    /// Public site URL used in sitemap/robots output.
    #[arg(long, env = "SITE_URL", default_value = "http://localhost:8080")]
    site_url: String,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing("plugstore_server=info,plugstore_core=info", args.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %args.addr,
        "Starting plugstore-server"
    );

    let db = match &args.database_url {
        Some(url) => Some(StoreDatabase::open(url, args.database_ssl).await?),
        None => {
            warn!("DATABASE_URL not set; catalog and admin endpoints will answer 503");
            None
        }
    };

    let smtp = SmtpConfig {
        host: args.smtp_host,
        port: args.smtp_port,
        secure: args.smtp_secure,
        username: args.smtp_user,
        password: args.smtp_pass,
        from: args.smtp_from,
    };
    let mailer = Mailer::from_config(&smtp)?;
    if mailer.is_none() {
        warn!("SMTP_HOST not set; trial-email endpoint will answer 503");
    }

    let jwt = Arc::new(JwtManager::new(
        args.admin_token_secret.as_bytes(),
        args.admin_token_ttl,
    ));

    let state = AppState {
        db,
        jwt,
        mailer,
        site_url: args.site_url.trim_end_matches('/').to_string(),
    };

    server::serve(args.addr, state).await
}
