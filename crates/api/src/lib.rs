//! Laboratory stock API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! export) so integration tests and the binary entrypoint can both access
//! them.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
