//! # HTTP Request Handlers
//!
//! ## Submodules
//! - `auth`: login and logout actions (form posts)
//! - `pages`: login form and protected dashboard
//! - `health`: health check endpoint (for monitoring)
//!
//! Handlers receive the cookie jar as an explicit extractor argument; nothing
//! reads cookies from ambient request context.

pub mod auth;
pub mod health;
pub mod pages;
