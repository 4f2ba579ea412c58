//! Tests for the swap workflow engine

mod service_tests;
