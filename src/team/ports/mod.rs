//! Port contracts for roster persistence.

pub mod repository;

pub use repository::RosterRepository;
