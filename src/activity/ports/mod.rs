//! Port contracts for activity persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by activity services.

pub mod repository;

pub use repository::ActivityRepository;
