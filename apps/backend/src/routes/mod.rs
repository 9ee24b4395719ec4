use actix_web::web;

pub mod games;
pub mod health;

/// All application routes: `/health` and `/api/games/**`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
