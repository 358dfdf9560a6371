//! # Help Page
//!
//! Serves `GET /<bot name>/help?q=<term>` with the public (non-admin) catalog as HTML.

use crate::application::assembler::CatalogAssembler;
use crate::application::catalog::HelpCatalog;
use crate::application::render;
use crate::strings::{logs, templates};
use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Clone)]
struct HelpPageState {
    catalog: Arc<HelpCatalog>,
    bot_name: String,
}

#[derive(Debug, Deserialize)]
struct HelpQuery {
    q: Option<String>,
}

pub fn help_path(bot_name: &str) -> String {
    format!("/{bot_name}/help")
}

pub fn create_help_router(catalog: Arc<HelpCatalog>, bot_name: &str) -> Router {
    Router::new()
        .route(&help_path(bot_name), get(help_page))
        .with_state(HelpPageState {
            catalog,
            bot_name: bot_name.to_string(),
        })
}

async fn help_page(State(state): State<HelpPageState>, Query(query): Query<HelpQuery>) -> Response {
    match render_help_page(&state.catalog, &state.bot_name, query.q.as_deref()) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!("Failed to render help page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub fn render_help_page(catalog: &HelpCatalog, bot_name: &str, query: Option<&str>) -> Result<String> {
    let lines = catalog.help_commands()?;
    let grouped = CatalogAssembler::new().assemble(&lines, false)?;
    let query = query.filter(|q| !q.is_empty());
    let fragment = render::html(&grouped.flatten(), bot_name, query);
    Ok(templates::help_page(bot_name, &fragment))
}

pub async fn serve(bind: &str, catalog: Arc<HelpCatalog>, bot_name: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind help page server to {bind}"))?;
    tracing::info!("{}", logs::http_listening(bind, &help_path(bot_name)));
    axum::serve(listener, create_help_router(catalog, bot_name))
        .await
        .context("Help page server failed")
}
