use actix_web::web;

use crate::handlers::{cv::generate_cv, home::home, system::health_check};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .service(health_check)
            .service(generate_cv),
    );
}
