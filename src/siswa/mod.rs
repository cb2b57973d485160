pub mod dto;
pub mod handlers;
pub mod pagination;
pub mod repo_types;
pub mod resolver;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::{auth, state::AppState};

/// Routes mounted under `/siswa`, login included.
pub fn router(state: &AppState) -> Router<AppState> {
    let mut list = get(handlers::list_siswa);
    if state.config.list_requires_auth {
        list = list.route_layer(from_fn_with_state(state.clone(), auth::require_auth));
    }

    Router::new()
        .route("/", list.merge(post(handlers::create_siswa)))
        .route(
            "/:id",
            get(handlers::get_siswa)
                .patch(handlers::update_siswa)
                .delete(handlers::delete_siswa),
        )
        .merge(auth::router())
}
