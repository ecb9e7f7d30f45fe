//! Database models and DTOs for all portal entities.

pub mod billing;
pub mod installation;
pub mod order;
pub mod pagination;
pub mod plan;
pub mod ticket;
pub mod user;
