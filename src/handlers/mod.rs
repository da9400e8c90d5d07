// handlers/mod.rs - Two-tier handler layout
//
// Public (no session identity) → Protected (session identity required).
// Protected handlers take an `AuthUser`, so an anonymous request is turned
// away with 401 before the handler body runs.

pub mod protected; // Session identity required (/api/*)
pub mod public; // No authentication (/api/signup, /api/signin, /health)
