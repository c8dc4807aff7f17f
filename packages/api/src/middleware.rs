pub mod auth;
pub mod instrumentation;
