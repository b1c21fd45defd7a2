//! Unit tests for the activity module.

mod service_tests;
