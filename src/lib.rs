mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, tenure, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, render};

use infrastructure::render::docx::HttpDocxRenderer;
use repositories::sqlx_repo::SqlxCvRepo;
use use_cases::cv::CvHandler;

pub struct AppState {
    pub cv_handler: AppCvHandler,
}

pub type AppCvHandler = CvHandler<SqlxCvRepo, HttpDocxRenderer>;

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let cv_repo = SqlxCvRepo::new(pool);
        let renderer = HttpDocxRenderer::new(&config.renderer_url, &config.template_name);

        AppState {
            cv_handler: CvHandler::new(cv_repo, renderer, config.locale),
        }
    }
}
