use axum::{
    body::Body,
    extract::{Extension, Form, Path, State},
    http::{
        header::{ACCEPT, RETRY_AFTER},
        HeaderMap, HeaderName, HeaderValue, Request, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::inventory::{InventoryPage, InventoryService};
use crate::system_info::get_system_info;
use crate::templates::{home_page, inventory_page, not_found_page, search_page};

#[derive(Debug, Deserialize)]
struct SearchForm {
    #[serde(default)]
    city: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    item: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

#[derive(Clone, Debug, Default)]
pub struct WebConfig {
    pub rate_limit_per_second: Option<u64>,
}

#[derive(Clone, Debug)]
struct RequestContext {
    request_id: String,
}

type AppState = Arc<InventoryService>;

pub fn router(service: AppState, config: WebConfig) -> Router {
    let request_id_layer = middleware::from_fn(assign_request_id);
    let mut router = Router::new()
        .route("/", get(home))
        .route("/search", get(search_form).post(search_submit))
        .route("/info", get(info))
        .route("/api/:city/:category", get(inventory_json))
        .route("/:city/:category", get(inventory_negotiated))
        .with_state(service);

    if let Some(rate_limit) = config.rate_limit_per_second {
        let limiter = Arc::new(RateLimiter::new(rate_limit, Duration::from_secs(1)));
        let rate_limit_layer = middleware::from_fn_with_state(limiter, rate_limit_requests);
        router = router.layer(rate_limit_layer);
    }

    router.layer(request_id_layer)
}

async fn home() -> Response {
    home_page().into_response()
}

async fn search_form() -> Response {
    search_page().into_response()
}

async fn info() -> Response {
    (StatusCode::OK, get_system_info()).into_response()
}

async fn search_submit(
    State(service): State<AppState>,
    Extension(request): Extension<RequestContext>,
    Form(form): Form<SearchForm>,
) -> Response {
    // A non-empty `item` names the product directly.
    let category = match form.item.as_deref().map(str::trim) {
        Some(item) if !item.is_empty() => item.to_string(),
        _ => form.category.clone(),
    };
    tracing::debug!(
        request_id = %request.request_id,
        city = %form.city,
        category = %category,
        "Search submitted"
    );
    render_html(&service, &request, &form.city, &category).await
}

async fn inventory_negotiated(
    State(service): State<AppState>,
    Extension(request): Extension<RequestContext>,
    Path((city, category)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if wants_json(&headers) {
        render_json(&service, &request, &city, &category).await
    } else {
        render_html(&service, &request, &city, &category).await
    }
}

async fn inventory_json(
    State(service): State<AppState>,
    Extension(request): Extension<RequestContext>,
    Path((city, category)): Path<(String, String)>,
) -> Response {
    render_json(&service, &request, &city, &category).await
}

async fn render_html(
    service: &InventoryService,
    request: &RequestContext,
    city: &str,
    category: &str,
) -> Response {
    match lookup(service, request, city, category).await {
        Ok(page) => inventory_page(&page).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            not_found_page(&city.to_lowercase(), &category.to_lowercase()),
        )
            .into_response(),
    }
}

async fn render_json(
    service: &InventoryService,
    request: &RequestContext,
    city: &str,
    category: &str,
) -> Response {
    match lookup(service, request, city, category).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(_) => not_found_response(),
    }
}

async fn lookup(
    service: &InventoryService,
    request: &RequestContext,
    city: &str,
    category: &str,
) -> Result<InventoryPage, ValidationError> {
    match service.lookup(city, category).await {
        Ok(page) => {
            tracing::debug!(
                request_id = %request.request_id,
                city = %page.city,
                category = %page.category,
                listing_count = page.listings.len(),
                source = ?page.source,
                "Built inventory page"
            );
            Ok(page)
        }
        Err(err) => {
            tracing::debug!(
                request_id = %request.request_id,
                error = %err,
                "Rejected inventory lookup"
            );
            Err(err)
        }
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .split(',')
                .next()
                .map(|first| first.trim().starts_with("application/json"))
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

/// Tag every request with a fresh id. Handler logs run inside a span that
/// carries it, and the response echoes it back in `x-request-id`.
async fn assign_request_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
    });
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let mut response = next.run(req).instrument(span.clone()).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }
    span.in_scope(|| tracing::debug!(status = %response.status(), "Request completed"));
    response
}

/// Sliding one-window limiter shared by every route.
#[derive(Debug)]
struct RateLimiter {
    limit: u64,
    window: Duration,
    admitted: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    fn new(limit: u64, window: Duration) -> Self {
        Self {
            limit,
            window,
            admitted: Mutex::new(VecDeque::new()),
        }
    }

    /// Record a request at `now` if the window has room for it.
    async fn admit(&self, now: Instant) -> bool {
        let mut admitted = self.admitted.lock().await;
        while admitted
            .front()
            .is_some_and(|ts| now.duration_since(*ts) >= self.window)
        {
            admitted.pop_front();
        }
        if admitted.len() as u64 >= self.limit {
            return false;
        }
        admitted.push_back(now);
        true
    }
}

async fn rate_limit_requests(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if limiter.admit(Instant::now()).await {
        return next.run(req).await;
    }
    tracing::warn!(
        path = %req.uri().path(),
        limit = limiter.limit,
        "Inventory lookups over rate limit"
    );
    let mut response = error_response(StatusCode::TOO_MANY_REQUESTS, "rate_limited");
    let retry_after = limiter.window.as_secs().max(1);
    response
        .headers_mut()
        .insert(RETRY_AFTER, HeaderValue::from(retry_after));
    response
}

fn error_response(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn not_found_response() -> Response {
    error_response(StatusCode::NOT_FOUND, "not_found")
}
