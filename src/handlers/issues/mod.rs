// handlers/issues/mod.rs - Scoped issue listing and detail

pub mod list; // GET /api/issues
pub mod show; // GET /api/issues/:id

pub use list::issues_get;
pub use show::issue_get;
