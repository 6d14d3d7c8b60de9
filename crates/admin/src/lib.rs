//! Orderdeck Admin library.
//!
//! This crate provides the admin backend as a library, allowing the
//! binary, the CLI, and tests to reuse the configuration, database, and
//! route layers.
//!
//! # Architecture
//!
//! - Axum JSON API consumed by the separate admin SPA
//! - `PostgreSQL` via sqlx for orders, products, users, and catalog data
//! - Session-cookie authentication (`PostgreSQL`-backed sessions)
//! - All derived dashboard math delegated to `orderdeck-core`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
