use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, HealthResponse, SearchRequest, SearchResponse};
use crate::routes::AppState;

/// Configure search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/search", web::post().to(search));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "industry": "plastics",
///   "geography": ["India", "United States"],
///   "roles": "IT Manager",
///   "company_size": {"min": 50, "max": 200},
///   "user_id": "string",
///   "limit": 50
/// }
/// ```
///
/// Empty result lists are a successful outcome, not an error.
async fn search(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = state.limits.effective(req.limit);
    let owner = req.user_id.as_deref();

    tracing::info!(owner = ?owner, limit, "Running ICP search");

    match state.engine.search(&req.filters(), owner, limit).await {
        Ok(results) => {
            tracing::info!(
                companies = results.companies.len(),
                people = results.people.len(),
                "Search finished"
            );
            HttpResponse::Ok().json(SearchResponse { results })
        }
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Search failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
