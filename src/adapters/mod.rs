//! Platform adapters — thin wrappers over ESP-IDF services with host
//! equivalents for simulation and tests.

pub mod time;
