pub mod cms;
pub mod commands;
pub mod config;
pub mod duration;
pub mod error;
pub mod keyring;
pub mod notify;
pub mod platform;
pub mod state;
pub mod sync;
pub mod youtube;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
