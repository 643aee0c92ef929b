// handlers/mod.rs - two-tier handler layout
//
// Public (no auth) → Protected (token gate applied as a route layer)

pub mod lifecycle;
pub mod protected;
pub mod public;
