use actix_web::{get, http::header, web, HttpResponse, Responder};
use serde::Deserialize;
use uuid::Uuid;

use crate::{constants::DOCX_CONTENT_TYPE, errors::AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct GenerateCvQuery {
    pub user_id: Option<String>,
}

#[get("/cv/generate")]
pub async fn generate_cv(
    state: web::Data<AppState>,
    query: web::Query<GenerateCvQuery>,
) -> impl Responder {
    let user_id = match parse_user_id(&query) {
        Ok(id) => id,
        Err(e) => return e.to_http_response(),
    };

    match state.cv_handler.generate(user_id).await {
        Ok(cv) => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, DOCX_CONTENT_TYPE))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", cv.filename),
            ))
            .body(cv.bytes),
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "CV generation failed");
            e.to_http_response()
        }
    }
}

fn parse_user_id(query: &GenerateCvQuery) -> Result<Uuid, AppError> {
    let raw = query
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::MissingParameter("user_id".into()))?;

    Uuid::parse_str(raw)
        .map_err(|_| AppError::InvalidParameter(format!("user_id is not a valid uuid: {raw}")))
}
