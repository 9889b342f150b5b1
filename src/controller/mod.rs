pub mod ids;
pub mod panel;
pub mod prefill;
pub mod store;

use actix_web::{HttpResponse, web};

/// Routes served by the league admin app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(panel::index))
        .route(panel::PANEL_PATH, web::get().to(panel::panel))
        .route(panel::PANEL_PATH, web::post().to(panel::panel_post))
        .route("/health", web::get().to(HttpResponse::Ok));
}
