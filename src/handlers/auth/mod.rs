// handlers/auth/mod.rs - Caller identity endpoints

pub mod whoami; // GET /api/auth/whoami

pub use whoami::whoami_get;
