//! # Middleware Module
//!
//! Middleware functions run before route handlers and can short-circuit the
//! request.
//!
//! ## Our Middleware
//! - `auth`: the session guard. Requests under `/dashboard` without a live
//!   session are redirected to the login page.

pub mod auth;
