// Infrastructure collaborators for stackfold: everything that touches the OS.

pub mod concurrency;
pub mod log_loader;

pub use log_loader::LogLoader;
