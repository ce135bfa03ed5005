// Main library entry point for livetrace.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
