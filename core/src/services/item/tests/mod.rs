//! Tests for the item listing service

mod service_tests;
