pub mod app;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod keys;
pub mod layout;
pub mod ui;
pub mod validate;
pub mod widgets;
