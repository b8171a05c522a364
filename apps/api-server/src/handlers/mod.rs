//! HTTP handlers and route configuration.

mod blog;
mod health;
mod user;

use std::sync::Arc;

use actix_web::web;
use quill_core::ports::TokenService;

use crate::middleware::AuthGate;
use crate::state::AppState;

/// Configure all application routes.
///
/// Every blog route sits behind [`AuthGate`]; `/bulk` is registered before
/// `/{id}` so it is not captured as an id.
pub fn configure_routes(cfg: &mut web::ServiceConfig, tokens: Arc<dyn TokenService>) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/v1")
                    .service(
                        web::scope("/user")
                            .route("/signup", web::post().to(user::signup))
                            .route("/signin", web::post().to(user::signin)),
                    )
                    // Protected routes
                    .service(
                        web::scope("/blog")
                            .wrap(AuthGate::new(tokens))
                            .service(
                                web::resource(["", "/"])
                                    .route(web::post().to(blog::create_post))
                                    .route(web::put().to(blog::update_post)),
                            )
                            .route("/bulk", web::get().to(blog::list_posts))
                            .route("/{id}", web::get().to(blog::get_post)),
                    ),
            ),
    );
}

/// Register application state and routes.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let tokens = state.tokens.clone();
        cfg.app_data(web::Data::new(state));
        configure_routes(cfg, tokens);
    }
}
