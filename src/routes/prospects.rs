use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, SaveProspectsRequest};
use crate::routes::AppState;

/// Configure prospect-list routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/prospects", web::post().to(save_prospects))
        .route("/prospects", web::get().to(list_prospects))
        .route("/prospects/{id}", web::get().to(get_prospect));
}

/// Run a search and persist its snapshot
///
/// POST /api/v1/prospects
///
/// The stored list holds the submitted filters and the engine output
/// verbatim, tied to the originating conversation.
async fn save_prospects(
    state: web::Data<AppState>,
    req: web::Json<SaveProspectsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = state.limits.effective(req.limit);
    let filters = req.filters();

    let results = match state.engine.search(&filters, Some(&req.user_id), limit).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Search failed while saving prospects: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Search failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match state
        .prospects
        .save(&req.user_id, &req.conversation_id, &filters, &results)
        .await
    {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => {
            tracing::error!("Failed to save prospect list: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save prospect list".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// List a user's prospect lists, newest first
///
/// GET /api/v1/prospects?userId={userId}
async fn list_prospects(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.prospects.list(user_id).await {
        Ok(lists) => HttpResponse::Ok().json(lists),
        Err(e) => {
            tracing::error!("Failed to list prospect lists for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list prospect lists".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Fetch one prospect list, owner-scoped
///
/// GET /api/v1/prospects/{id}?userId={userId}
async fn get_prospect(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.prospects.get(&path, user_id).await {
        Ok(Some(list)) => HttpResponse::Ok().json(list),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Prospect list not found".to_string(),
            message: format!("No prospect list {} for this user", path),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch prospect list {}: {}", path, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch prospect list".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
