use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, ImportRequest};
use crate::routes::AppState;

/// Configure import routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/imports", web::post().to(import_rows));
}

/// Import a batch of pre-parsed rows
///
/// POST /api/v1/imports
///
/// Rows with a `user_id` stay private to that owner; owner-less batches are
/// globally visible vault data. The response reports per-row outcomes.
async fn import_rows(state: web::Data<AppState>, req: web::Json<ImportRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        rows = req.rows.len(),
        owner = ?req.user_id,
        "Importing rows"
    );

    match state
        .ingestor
        .import_rows(&req.rows, req.user_id.as_deref(), req.country_default.as_deref())
        .await
    {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => {
            tracing::error!("Import failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Import failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
