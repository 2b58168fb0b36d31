// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Security Level: JWT Authentication Required
// Route Prefix: /api/*
// Middleware: jwt_auth_middleware, which injects AuthUser into request extensions.
// Every query below is scoped to AuthUser::user_id.

pub mod auth;
pub mod plan_details;
pub mod plans;

pub use auth::*;
