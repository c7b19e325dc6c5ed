//! HTTP handlers and route configuration.

mod form;
mod health;
mod posts;


use std::path::Path;

use actix_files::Files;
use actix_web::web;

use quill_core::domain::UPLOADS_ROUTE;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post routes
            .service(
                web::resource("/posts")
                    .route(web::get().to(posts::list_posts))
                    .route(web::post().to(posts::create_post)),
            )
            .service(
                web::resource("/posts/{id}")
                    .route(web::get().to(posts::get_post))
                    .route(web::put().to(posts::update_post))
                    .route(web::delete().to(posts::delete_post)),
            ),
    );
}

/// Read-only static route serving stored images by their generated name.
pub fn uploads_service(upload_dir: &Path) -> Files {
    Files::new(UPLOADS_ROUTE, upload_dir)
}
