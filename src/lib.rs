//! cv-tailor library

pub mod cli;
pub mod config;
pub mod error;
pub mod explorer;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{CvTailorError, Result};
