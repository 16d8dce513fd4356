use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::user;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let users = Router::new()
        .route("/users", post(user::create_user).get(user::list_users))
        .route(
            "/users/:id",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        );

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", users)
        .with_state(state)
}
