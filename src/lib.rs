//! Skill gap analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod request;
pub mod server;
pub mod taxonomy;

pub use config::Config;
pub use error::{Result, SkillGapError};
