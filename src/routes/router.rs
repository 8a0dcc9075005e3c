/**
 * Router Assembly
 *
 * Wires handlers into the route tree:
 *
 * - /api/users    - signup/login/verify are public, the rest sits
 *                   behind the auth middleware
 * - /api/contacts - entirely behind the auth middleware
 * - /avatars      - static files from the public avatar directory
 *
 * A TraceLayer wraps the whole app for request logging.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::handlers as users;
use crate::contacts::handlers as contacts;
use crate::middleware::authenticate;
use crate::server::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let users_public = Router::new()
        .route("/signup", post(users::signup))
        .route("/login", post(users::login))
        .route("/verify/{token}", get(users::verify_email))
        .route("/verify", post(users::resend_verification));

    let users_private = Router::new()
        .route("/logout", get(users::logout))
        .route("/current", get(users::current))
        .route("/", patch(users::update_subscription))
        .route("/avatars", patch(users::update_avatar))
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    let contacts = Router::new()
        .route("/", get(contacts::list_contacts).post(contacts::create_contact))
        .route(
            "/{id}",
            get(contacts::get_contact)
                .put(contacts::replace_contact)
                .delete(contacts::delete_contact),
        )
        .route("/{id}/favorite", patch(contacts::update_favorite))
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    let avatar_dir = state.config.public_dir.join("avatars");

    Router::new()
        .nest("/api/users", users_public.merge(users_private))
        .nest("/api/contacts", contacts)
        .nest_service("/avatars", ServeDir::new(avatar_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
