pub mod canonical;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod package;
pub mod prompt;
pub mod render;
pub mod scaffold;
pub mod state;
pub mod types;

pub use canonical::to_canonical_json;
pub use catalog::{Catalog, Resolution};
pub use compose::{compose, MergeResult, StepKey};
pub use config::{BlueprintConfig, ConfigLoader, ConfigValidator};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use render::{document_digest, render, render_json, render_yaml, OutputFormat};
pub use state::{decode_state, encode_state, PartialState, SelectionState};
pub use types::*;
