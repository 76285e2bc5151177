use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    domain::entities::cv::CvViewModel,
    errors::{PlaceholderDiagnostic, RenderError},
};

/// Seam to the external document-render collaborator. The service only ever
/// consumes this contract; it never fills templates itself.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, view_model: &CvViewModel) -> Result<Vec<u8>, RenderError>;
}

/// Render service reached over HTTP: POSTs the view model as JSON and gets
/// the filled `.docx` bytes back. No retry, no template repair.
#[derive(Clone)]
pub struct HttpDocxRenderer {
    client: reqwest::Client,
    base_url: String,
    template_name: String,
}

#[derive(Deserialize)]
struct TemplateErrorBody {
    errors: Vec<PlaceholderDiagnostic>,
}

impl HttpDocxRenderer {
    pub fn new(base_url: &str, template_name: &str) -> Self {
        HttpDocxRenderer {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            template_name: template_name.to_string(),
        }
    }
}

#[async_trait]
impl DocumentRenderer for HttpDocxRenderer {
    async fn render(&self, view_model: &CvViewModel) -> Result<Vec<u8>, RenderError> {
        let url = format!("{}/render/{}", self.base_url, self.template_name);

        let response = self
            .client
            .post(&url)
            .json(view_model)
            .send()
            .await
            .map_err(|e| RenderError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| RenderError::Upstream(e.to_string())),
            StatusCode::UNPROCESSABLE_ENTITY => {
                let body: TemplateErrorBody = response
                    .json()
                    .await
                    .map_err(|e| RenderError::Upstream(e.to_string()))?;
                Err(RenderError::Template(body.errors))
            }
            status => Err(RenderError::Upstream(format!(
                "render service returned {}",
                status
            ))),
        }
    }
}
