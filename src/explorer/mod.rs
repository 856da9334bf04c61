//! CSV datasets, join-key detection and query suggestions

pub mod dataset;
pub mod relationships;
pub mod suggest;

pub use dataset::{Dataset, DatasetCollection, DatasetLoader};
pub use relationships::{detect_relationships, JoinKeys};
pub use suggest::QuerySuggester;
