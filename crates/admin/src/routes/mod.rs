//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies PostgreSQL)
//!
//! # Auth
//! POST /auth/login             - Password login, sets session cookie
//! POST /auth/logout            - Destroy the session
//! POST /auth/register          - Create an admin user (authenticated)
//! GET  /auth/me                - Current logged-in admin
//!
//! # Dashboard
//! GET  /dashboard/metrics      - Windowed totals, trends, chart series
//!
//! # Orders
//! GET  /orders                 - Order listing
//! GET  /orders/{id}            - Order detail (expenses + payment log)
//! PUT  /orders/{id}            - Partial order update
//! POST /orders/{id}/mark-paid  - pending -> paid transition
//! POST /orders/{id}/cancel     - pending -> canceled transition
//!
//! # Catalog
//! GET/POST        /products              PUT/DELETE /products/{id}
//! GET/POST        /categories            GET/PUT/DELETE /categories/{id}
//! GET/POST        /shops                 PUT/DELETE /shops/{id}
//!
//! # Users
//! GET  /users                  - User listing
//! PUT  /users/{id}             - Update name/email/role
//! DELETE /users/{id}           - Remove a user
//! ```

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod shops;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Assemble the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::me))
        // Dashboard
        .route("/dashboard/metrics", get(dashboard::metrics))
        // Orders
        .route("/orders", get(orders::list))
        .route("/orders/{id}", get(orders::show).put(orders::update))
        .route("/orders/{id}/mark-paid", post(orders::mark_paid))
        .route("/orders/{id}/cancel", post(orders::cancel))
        // Products
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        // Categories
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::delete),
        )
        // Shops
        .route("/shops", get(shops::list).post(shops::create))
        .route("/shops/{id}", put(shops::update).delete(shops::delete))
        // Users
        .route("/users", get(users::list))
        .route("/users/{id}", put(users::update).delete(users::delete))
}
