//! Report structures and their console, JSON, Markdown and HTML renderings

pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::{ApplicationPackage, ExplorationReport};
