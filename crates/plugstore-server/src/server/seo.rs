//! Static text responders: sitemap.xml and robots.txt.

use std::fmt::Write;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use super::AppState;
use super::error::ApiError;

/// `GET /sitemap.xml` - homepage plus one entry per product slug. An
/// unconfigured database yields a sitemap with just the homepage.
pub async fn sitemap(State(state): State<AppState>) -> Result<Response, ApiError> {
    let slugs = match &state.db {
        Some(db) => db.list_slugs().await?,
        None => Vec::new(),
    };

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    let _ = writeln!(xml, "  <url><loc>{}/</loc></url>", state.site_url);
    for slug in slugs {
        let _ = writeln!(
            xml,
            "  <url><loc>{}/products/{slug}</loc></url>",
            state.site_url
        );
    }
    xml.push_str("</urlset>\n");

    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

/// `GET /robots.txt`
pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    let body = format!(
        "User-agent: *\nAllow: /\nDisallow: /admin\n\nSitemap: {}/sitemap.xml\n",
        state.site_url
    );
    ([(header::CONTENT_TYPE, "text/plain")], body)
}
