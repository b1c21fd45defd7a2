//! Port contracts for JAG project persistence.

pub mod repository;

pub use repository::JagRepository;
