// File browser library - exposes all core modules for testing

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod config_io;
pub mod i18n;
pub mod model;
pub mod services;
pub mod view;
