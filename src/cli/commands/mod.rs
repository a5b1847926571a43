pub mod access;
pub mod report;
pub mod server;
pub mod sla;
