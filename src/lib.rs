//! A minimal `top`: kernel counters from `/proc`, turned into rates and shown
//! as a refreshing table.

pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod report;
pub mod system;
pub mod ui;
