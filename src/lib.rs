pub mod config;
pub mod domain;
pub mod infra;
pub mod usecase;

#[cfg(feature = "desktop")]
pub mod app;
#[cfg(feature = "desktop")]
pub mod platform;
#[cfg(feature = "desktop")]
pub mod ui;
