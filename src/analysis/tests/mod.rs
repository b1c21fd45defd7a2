//! Unit tests for the analysis module.

mod service_tests;
