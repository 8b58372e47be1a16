// src/lib.rs

pub mod analysis;
pub mod config;
pub mod gemini;
pub mod presets;
pub mod prompt;
pub mod server;
