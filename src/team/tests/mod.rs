//! Unit tests for the team module.

mod domain_tests;
