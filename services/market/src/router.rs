use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use campus_core::health::{healthz, readyz};
use campus_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    accounts::{deactivate, get_me, update_me},
    auth::{complete_registration, login, request_registration_code, verify_2fa},
    listings::{create_listing, get_listing},
    orders::{archive_order, create_order, get_order, transition_order},
    requirements::{
        apply, archive_requirement, create_requirement, delete_requirement, get_requirement,
        select_applicant, update_requirement,
    },
    reviews::create_review,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/verify", post(verify_2fa))
        .route("/auth/registration/code", post(request_registration_code))
        .route("/auth/registration", post(complete_registration))
        // Accounts
        .route("/accounts/me", get(get_me))
        .route("/accounts/me", patch(update_me))
        .route("/accounts/{id}", delete(deactivate))
        // Service listings
        .route("/services", post(create_listing))
        .route("/services/{id}", get(get_listing))
        // Orders
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", patch(transition_order))
        .route("/orders/{id}/archived", patch(archive_order))
        // Requirements
        .route("/requirements", post(create_requirement))
        .route("/requirements/{id}", get(get_requirement))
        .route("/requirements/{id}/applications", post(apply))
        .route("/requirements/{id}/selection", post(select_applicant))
        .route("/requirements/{id}", patch(update_requirement))
        .route("/requirements/{id}/archived", patch(archive_requirement))
        .route("/requirements/{id}", delete(delete_requirement))
        // Reviews
        .route("/reviews", post(create_review))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
