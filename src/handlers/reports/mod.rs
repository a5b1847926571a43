// handlers/reports/mod.rs - Report downloads

pub mod export; // GET /api/reports/export

pub use export::export_get;
