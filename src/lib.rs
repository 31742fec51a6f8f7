pub mod action;
pub mod app;
pub mod client;
pub mod config;
pub mod event;
pub mod format;
pub mod stats;
pub mod ui;
