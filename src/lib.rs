pub mod app;
pub mod command;
pub mod config;
pub mod core;
pub mod editor;
pub mod emulation;
pub mod event;
pub mod logging;
pub mod motion;
pub mod persistence;
pub mod text;
pub mod ui;
