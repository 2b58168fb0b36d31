// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT auth)

pub mod health;    // Liveness and service banner
pub mod public;    // No authentication required (/api/register, /api/login)
pub mod protected; // JWT authentication required (/api/*)
