pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{educations, experiences, skills, users};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/users/:user_id/avatar",
            post(users::avatar::handle_upload_avatar),
        );

    router = users::resource().mount(router, "/users", "/users/:user_id");
    router = experiences::resource().mount(
        router,
        "/users/:user_id/experiences",
        "/users/:user_id/experiences/:id",
    );
    router = educations::resource().mount(
        router,
        "/users/:user_id/educations",
        "/users/:user_id/educations/:id",
    );
    router = skills::resource().mount(
        router,
        "/users/:user_id/skills",
        "/users/:user_id/skills/:id",
    );

    router.with_state(state)
}
