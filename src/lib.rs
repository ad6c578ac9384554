//! Document model for interactive learning modules.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Model, Step, Question, Asset)
//! - `services/` - Migration, navigation windowing, text and video helpers
//! - `state.rs` - Runtime presentation flags owned by the playback UI
//! - `error.rs` - Error type shared by the crate

pub mod domain;
pub mod error;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use domain::{
    Asset, AssetType, Assets, Format, Model, ModelDefaults, Question, QuestionOption,
    QuestionType, Quiz, QuizResult, Step, StepKind, TemplateParams,
};
pub use error::{ModelError, Result};
pub use services::navigation::{window, WindowEntry, DEFAULT_RANGE};
pub use services::video::VideoProvider;
pub use state::{PresentationState, StepFlags};
