//! # Miterline App
//!
//! Headless driver for the thick line renderer.
//!
//! ## Overview
//!
//! - [`Args`] - Command line arguments (clap)
//! - [`InputDispatcher`] - Key presses to quit and shader hot-reload actions
//! - [`run`] - Path to buffers to linked program to uploaded mesh

mod args;
mod error;
mod input;
mod run;

pub use args::{Args, DEFAULT_ASPECT};
pub use error::AppError;
pub use input::{InputAction, InputDispatcher, map_winit_key, parse_key_name};
pub use run::{RunReport, dump_buffers, run};

/// App library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
