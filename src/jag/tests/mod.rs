//! Unit tests for the JAG module.

mod domain_tests;
mod service_tests;
