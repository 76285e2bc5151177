use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum AppError {
    MissingParameter(String),
    InvalidParameter(String),
    NotFound(String),
    UpstreamRead { query: &'static str, message: String },
    TemplateRender(Vec<PlaceholderDiagnostic>),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingParameter(name) => write!(f, "Missing parameter: {}", name),
            AppError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::UpstreamRead { query, message } => {
                write!(f, "Upstream read failed ({}): {}", query, message)
            }
            AppError::TemplateRender(diags) => {
                let messages = diags
                    .iter()
                    .map(|d| format!("{}:{}", d.id, d.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Template rendering failed: {}", messages)
            }
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::TemplateRender(diags) => {
                serde_json::json!({
                    "error": "Template rendering failed",
                    "details": diags
                })
            }
            AppError::UpstreamRead { query, message } => {
                serde_json::json!({
                    "error": "Upstream read failed",
                    "details": format!("{}: {}", query, message)
                })
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamRead { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TemplateRender(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    pub fn upstream(query: &'static str, err: impl fmt::Display) -> Self {
        AppError::UpstreamRead {
            query,
            message: err.to_string(),
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Template(diags) => AppError::TemplateRender(diags),
            RenderError::Upstream(msg) => AppError::upstream("render_document", msg),
        }
    }
}

/// Errors raised by the document-renderer collaborator. Template failures
/// carry the renderer's own per-placeholder diagnostics and are surfaced to
/// the caller verbatim, never collapsed into a generic message.
#[derive(Debug, Display)]
pub enum RenderError {
    #[display("Template rejected the view model")]
    Template(Vec<PlaceholderDiagnostic>),

    #[display("Renderer unavailable: {_0}")]
    Upstream(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderDiagnostic {
    pub id: String,
    pub message: String,
    pub explanation: String,
}
