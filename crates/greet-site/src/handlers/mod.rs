//! Route Handlers
//!
//! HTTP request handlers for all routes.

pub mod home;
