// Library exports for the Squat Coach CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
pub mod recording;
pub mod ui;
