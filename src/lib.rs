pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod debounce;
pub mod error;
pub mod event;
pub mod state;
pub mod ui;

pub use error::{DataError, Result};
