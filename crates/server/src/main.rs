#![doc = include_str!("../README.md")]

mod config;
mod error;
mod template;
mod tracing_config;

use std::{collections::HashMap, num::NonZeroUsize, sync::Arc};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use config::Config;
use error::{ServerError, ServerResult};
use numerology::{Alphabet, CalculationResult, CalculationVariant, Calculator, LetterRow};
use template::{IndexPageFields, Templates};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

/// Global state shared for all requests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Calculator configured with the server's variation policy.
    calculator: Calculator,
    /// Longest text, in characters, accepted by the calculation endpoints.
    max_text_length: NonZeroUsize,
    /// A templating engine for server-side rendering.
    templates: Arc<Templates>,
}

/// Body of `POST /api/numerology`.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CalculationRequest {
    /// Text to value. Missing and null are treated like blank text.
    text: Option<String>,
    /// Integer alphabet code, unknown codes fall back to Arabic.
    #[serde(default)]
    alphabet: Alphabet,
    /// Integer variant code, unknown codes fall back to normal.
    #[serde(default, rename = "Type")]
    variant: CalculationVariant,
}

/// Body of `POST /api/ebced`.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EbcedRequest {
    /// Arabic text to value.
    text: Option<String>,
}

/// Arabic-only response shape kept for older clients.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct EbcedResult {
    /// The input with whitespace and diacritics removed.
    normalized: String,
    /// Sum of the row values.
    total: i64,
    /// One row per normalized character.
    rows: Vec<LetterRow>,
}

impl From<CalculationResult> for EbcedResult {
    fn from(result: CalculationResult) -> Self {
        Self {
            normalized: result.normalized,
            total: result.total,
            rows: result.rows,
        }
    }
}

/// Reject missing or blank text, and text longer than `max` characters.
fn validate_text(text: Option<&str>, max: NonZeroUsize) -> ServerResult<&str> {
    let text = text
        .filter(|text| !text.trim().is_empty())
        .ok_or(ServerError::TextEmpty)?;

    if text.chars().count() > max.get() {
        return Err(ServerError::TextTooLong { max: max.get() });
    }

    Ok(text)
}

// Handlers
/// Value `Text` in the requested alphabet and variant, returning rows, total and, for Arabic, the
/// alternate totals.
#[tracing::instrument(
    skip_all,
    fields(alphabet = tracing::field::Empty, variant = tracing::field::Empty)
)]
async fn calculate_numerology(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ServerResult<Json<CalculationResult>> {
    let Json(request) = payload?;
    let span = tracing::Span::current();
    span.record("alphabet", request.alphabet.code());
    span.record("variant", request.variant.code());

    let text = validate_text(request.text.as_deref(), state.max_text_length)?;
    let result = state
        .calculator
        .calculate(text, request.alphabet, request.variant)?;

    tracing::debug!(
        total = result.total,
        letters = result.letter_count(),
        "Calculated"
    );
    Ok(Json(result))
}

/// Value `Text` as Arabic with the normal table, in the older response shape without variations.
#[tracing::instrument(skip_all)]
async fn calculate_ebced(
    State(state): State<AppState>,
    payload: Result<Json<EbcedRequest>, JsonRejection>,
) -> ServerResult<Json<EbcedResult>> {
    let Json(request) = payload?;

    let text = validate_text(request.text.as_deref(), state.max_text_length)?;
    let result =
        state
            .calculator
            .calculate(text, Alphabet::Arabic, CalculationVariant::Normal)?;

    tracing::debug!(total = result.total, "Calculated");
    Ok(Json(result.into()))
}

/// Render the index page listing the supported alphabets.
#[tracing::instrument(skip_all)]
async fn index_page(State(state): State<AppState>) -> ServerResult<impl IntoResponse> {
    let fields = IndexPageFields::new(
        state.max_text_length.get(),
        state.calculator.policy().as_str(),
    );
    let html = state.templates.render_index_page(&fields)?;

    Ok((
        [(axum::http::header::CACHE_CONTROL, "public, max-age=3600")],
        Html(html),
    ))
}

/// Returns a JSON 404 for any unknown route.
async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Constructs a static response at compile time from constant data. Useful for embedding static
/// files into the binary at compile time.
const fn build_response_for_static_file(
    data: &'static [u8],
    content_type: &'static str,
) -> impl IntoResponse {
    (
        [
            (axum::http::header::CONTENT_TYPE, content_type),
            (
                axum::http::header::CACHE_CONTROL,
                "public, max-age=604800, must-revalidate",
            ),
        ],
        data,
    )
}

/// Build the application router with all routes and middleware.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", {
            Router::new()
                .route("/health", get(|| async { "OK" }))
                .route("/numerology", post(calculate_numerology))
                .route("/ebced", post(calculate_ebced))
        })
        // Homepage
        .route("/", get(index_page))
        // Static Resources
        .route(
            "/styles.css",
            get(|| async {
                build_response_for_static_file(include_bytes!("../static/styles.css"), "text/css")
            }),
        )
        .fallback(not_found)
        // State and middleware
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new().br(true).gzip(true))
}

/// Resolves once the process receives ctrl-c / SIGINT.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> ServerResult<()> {
    let env = std::env::vars().collect::<HashMap<String, String>>();
    let config = Config::from_env(&env)?;

    let tracing_guard = tracing_config::init_tracing(&config.tracing)?;

    let app_state = AppState {
        calculator: Calculator::new(config.calculation.variation_policy),
        max_text_length: config.calculation.max_text_length,
        templates: Arc::new(Templates::new()?),
    };

    let listener = tokio::net::TcpListener::bind((config.server.host, config.server.port)).await?;
    let address = listener.local_addr()?;

    tracing::info!(
        %address,
        max_text_length = config.calculation.max_text_length.get(),
        variation_policy = %config.calculation.variation_policy,
        "Listening"
    );

    axum::serve(listener, router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown");
    tracing_guard.shutdown();

    Ok(())
}
