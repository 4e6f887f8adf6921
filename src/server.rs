// src/server.rs
use crate::generation::client::TextGenerator;
use crate::pipeline::{ReportPipeline, StoredReport};
use crate::storage::DOWNLOAD_NAME;
use crate::utils::error::StorageError;
use crate::utils::AppError;
use axum::{
    extract::{Form, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Shared by every handler. `in_flight` keeps generations one at a time, since
/// they all write the same output document.
struct AppState<G> {
    pipeline: ReportPipeline<G>,
    in_flight: Mutex<()>,
}

#[derive(Debug, Deserialize)]
struct GenerateForm {
    item: String,
}

pub fn router<G>(pipeline: ReportPipeline<G>) -> Router
where
    G: TextGenerator + Send + Sync + 'static,
{
    let state = Arc::new(AppState {
        pipeline,
        in_flight: Mutex::new(()),
    });

    Router::new()
        .route("/", get(index::<G>))
        .route("/generate", post(generate::<G>))
        .route("/download", get(download::<G>))
        .with_state(state)
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve<G>(pipeline: ReportPipeline<G>, addr: &str) -> Result<(), AppError>
where
    G: TextGenerator + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Serving report form on http://{}", listener.local_addr()?);

    axum::serve(listener, router(pipeline)).await?;
    Ok(())
}

async fn index<G>(State(state): State<Arc<AppState<G>>>) -> Html<String>
where
    G: TextGenerator + Send + Sync + 'static,
{
    Html(render_page(state.pipeline.store().has_document(), None))
}

async fn generate<G>(
    State(state): State<Arc<AppState<G>>>,
    Form(form): Form<GenerateForm>,
) -> Response
where
    G: TextGenerator + Send + Sync + 'static,
{
    let _guard = state.in_flight.lock().await;
    tracing::info!("Generation requested for '{}'", form.item);

    match generate_and_render(Arc::clone(&state), form.item).await {
        Ok(report) => {
            tracing::info!("Generation finished with {} sections", report.sections.len());
            Html(render_page(true, None)).into_response()
        }
        Err(AppError::Config(message)) => {
            (StatusCode::BAD_REQUEST, Html(render_page(false, Some(&message)))).into_response()
        }
        Err(e) => {
            tracing::error!("Generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_page(false, Some(&e.to_string()))),
            )
                .into_response()
        }
    }
}

/// Generation awaits the model; rendering touches the filesystem and packs the
/// archive, so it runs on the blocking pool instead of a runtime worker.
async fn generate_and_render<G>(
    state: Arc<AppState<G>>,
    item: String,
) -> Result<StoredReport, AppError>
where
    G: TextGenerator + Send + Sync + 'static,
{
    let raw = state.pipeline.generate_text(&item).await?;
    let subject = item.trim().to_string();
    tokio::task::spawn_blocking(move || state.pipeline.render_raw(&subject, &raw)).await?
}

async fn download<G>(State(state): State<Arc<AppState<G>>>) -> Response
where
    G: TextGenerator + Send + Sync + 'static,
{
    match state.pipeline.store().load_document() {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, DOCX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", DOWNLOAD_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(StorageError::NotGenerated) => {
            (StatusCode::NOT_FOUND, "No document has been generated yet").into_response()
        }
        Err(e) => {
            tracing::error!("Could not read stored document: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn render_page(doc_generated: bool, error: Option<&str>) -> String {
    let mut body = String::from(
        "<!DOCTYPE html>\n<html>\n<head><title>Item Definition Generator</title></head>\n<body>\n\
         <h1>Item Definition Generator</h1>\n\
         <form method=\"post\" action=\"/generate\">\n\
         <label for=\"item\">Item</label>\n\
         <input type=\"text\" id=\"item\" name=\"item\" required>\n\
         <button type=\"submit\">Generate</button>\n\
         </form>\n\
         <p>Generation takes several minutes; keep this page open.</p>\n",
    );
    if let Some(message) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(message)));
    }
    if doc_generated {
        body.push_str("<p><a href=\"/download\">Download the generated document</a></p>\n");
    }
    body.push_str("</body>\n</html>\n");
    body
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
