use std::collections::HashMap;

use serde::Serialize;
use tracing::trace;

use super::asset::Asset;
use super::model::Model;
use super::question::Question;
use super::schema::{RawQuestion, RawStep};
use crate::error::Result;
use crate::services::text_ops::{decode_entities, random_token, render_template};
use crate::services::video::VideoProvider;

pub const DEFAULT_THEME: &str = "light";

const DEFAULT_ID_LEN: usize = 6;

/// Questions of a quiz step, never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    /// Build from question records. A missing or empty list gets one default question.
    pub fn from_raw(records: Option<&[RawQuestion]>) -> Self {
        let questions: Vec<Question> = records
            .unwrap_or_default()
            .iter()
            .map(Question::from_raw)
            .collect();
        Self::new(questions)
    }

    pub fn new(questions: Vec<Question>) -> Self {
        if questions.is_empty() {
            return Self {
                questions: vec![Question::default()],
            };
        }
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Position of the question within this quiz.
    pub fn question_index(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    pub fn questions_by_id(&self) -> HashMap<&str, &Question> {
        self.questions.iter().map(|q| (q.id.as_str(), q)).collect()
    }
}

/// Variant of a step, selected by the record's `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    Text,
    Hero,
    /// `content` holds an asset id.
    Image,
    /// `content` holds the watch URL.
    Youtube,
    Vimeo,
    Quiz(Quiz),
    /// Unknown type, kept verbatim with no specialized behavior.
    Other(String),
}

impl StepKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Hero => "hero",
            Self::Image => "image",
            Self::Youtube => "youtube",
            Self::Vimeo => "vimeo",
            Self::Quiz(_) => "quiz",
            Self::Other(s) => s,
        }
    }
}

/// Values available to `{{...}}` tags in text steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub success: bool,
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub id: String,
    pub kind: StepKind,
    pub title: String,
    pub content: String,
    pub theme: String,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            id: random_token(DEFAULT_ID_LEN),
            kind: StepKind::Text,
            title: String::new(),
            content: String::new(),
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Step {
    /// Dispatch a step record to its variant.
    ///
    /// Image content is taken as-is; legacy URLs must already have been
    /// migrated to asset ids (see `services::migration`).
    pub fn from_raw(raw: &RawStep) -> Self {
        let kind = match raw.kind.as_str() {
            "text" => StepKind::Text,
            "hero" => StepKind::Hero,
            "image" => StepKind::Image,
            "youtube" => StepKind::Youtube,
            "vimeo" => StepKind::Vimeo,
            "quiz" => StepKind::Quiz(Quiz::from_raw(raw.questions.as_deref())),
            other => {
                trace!("Step {} has unknown type '{}', using generic step", raw.id, other);
                StepKind::Other(other.to_string())
            }
        };

        Self {
            id: raw.id.clone(),
            kind,
            title: raw.title.clone(),
            content: raw.content.clone(),
            theme: raw
                .theme
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_THEME.to_string()),
        }
    }

    pub fn to_raw(&self) -> RawStep {
        RawStep {
            id: self.id.clone(),
            kind: self.kind.as_str().to_string(),
            title: self.title.clone(),
            content: self.content.clone(),
            theme: Some(self.theme.clone()),
            questions: self
                .quiz()
                .map(|quiz| quiz.questions().iter().map(Question::to_raw).collect()),
        }
    }

    pub fn type_name(&self) -> &str {
        self.kind.as_str()
    }

    pub fn is_quiz(&self) -> bool {
        matches!(self.kind, StepKind::Quiz(_))
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        match &self.kind {
            StepKind::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }

    /// Quiz steps start locked; everything else starts unlocked.
    pub fn locked_by_default(&self) -> bool {
        self.is_quiz()
    }

    /// Position of this step in `model`, by identity, falling back to id.
    ///
    /// Linear in the number of steps. Nothing is cached, so the answer stays
    /// right however the caller got hold of the step.
    pub fn index(&self, model: &Model) -> Option<usize> {
        let steps = model.steps();
        steps
            .iter()
            .position(|step| std::ptr::eq(step, self))
            .or_else(|| steps.iter().position(|step| step.id == self.id))
    }

    /// The registry asset an image step points at.
    pub fn asset<'m>(&self, model: &'m Model) -> Option<&'m Asset> {
        match self.kind {
            StepKind::Image => model.assets().get(&self.content),
            _ => None,
        }
    }

    /// Display URL: the resolved asset for images, the raw link for videos.
    ///
    /// Empty when an image's asset is missing or the step has no media.
    pub fn url<'a>(&'a self, model: &'a Model) -> &'a str {
        match self.kind {
            StepKind::Image => self.asset(model).map(Asset::url).unwrap_or(""),
            StepKind::Youtube | StepKind::Vimeo => &self.content,
            _ => "",
        }
    }

    pub fn video_provider(&self) -> Option<VideoProvider> {
        match self.kind {
            StepKind::Youtube => Some(VideoProvider::Youtube),
            StepKind::Vimeo => Some(VideoProvider::Vimeo),
            _ => None,
        }
    }

    /// Embeddable player URL for video steps, `None` for other steps.
    pub fn iframe_url(&self) -> Option<Result<String>> {
        self.video_provider()
            .map(|provider| provider.embed_url(&self.content))
    }

    /// Render a text or hero step's content with `params`, `None` for other steps.
    pub fn compile(&self, params: &TemplateParams) -> Option<Result<String>> {
        match self.kind {
            StepKind::Text | StepKind::Hero => {
                Some(render_template(&decode_entities(&self.content), params))
            }
            _ => None,
        }
    }
}
