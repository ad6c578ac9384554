//! Domain layer - the learning module's object graph.
//!
//! - `schema` - serialized record shapes
//! - `asset` - media assets and the asset registry
//! - `question` - quiz questions, options and scoring
//! - `step` - the step variants
//! - `model` - the module aggregate
//! - `settings` - configurable defaults for new modules

pub mod asset;
pub mod model;
pub mod question;
pub mod schema;
pub mod settings;
pub mod step;

pub use asset::{Asset, AssetType, Assets};
pub use model::{Format, Model, QuizResult};
pub use question::{Question, QuestionOption, QuestionType};
pub use schema::{RawAsset, RawModel, RawOption, RawQuestion, RawStep};
pub use settings::ModelDefaults;
pub use step::{Quiz, Step, StepKind, TemplateParams};
