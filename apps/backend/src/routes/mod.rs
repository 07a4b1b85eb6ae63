use actix_web::web;

pub mod auth;
pub mod health;
pub mod parcels;
pub mod reviews;
pub mod users;

/// Register every route. Shared by `main` and the integration tests so both
/// exercise the same table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Public: GET /, GET /health
    health::configure_routes(cfg);

    // Public: POST /jwt
    auth::configure_routes(cfg);

    cfg.service(web::scope("/users").configure(users::configure_routes));
    cfg.service(web::scope("/parcels").configure(parcels::configure_routes));
    cfg.service(web::scope("/reviews").configure(reviews::configure_routes));
}
