// Main library entry point for stackfold.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
