use std::collections::HashMap;

use serde_json::Value;

use super::asset::Assets;
use super::question::Question;
use super::schema::RawModel;
use super::settings::ModelDefaults;
use super::step::{Step, TemplateParams};
use crate::error::Result;
use crate::services::migration;
use crate::services::navigation::{self, WindowEntry};
use crate::services::text_ops::random_token;

const MODULE_ID_LEN: usize = 6;

/// Aspect ratio the module is authored for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    SixteenToNine,
    FourToThree,
    Other(String),
}

impl Format {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SixteenToNine => "16_9",
            Self::FourToThree => "4_3",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "16_9" => Self::SixteenToNine,
            "4_3" => Self::FourToThree,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Outcome of scoring a full set of answers against every quiz in a module.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    /// Sum of the per-question scores.
    pub score: f64,
    /// Questions answered exactly right.
    pub correct: usize,
    pub total: usize,
    /// `correct / total` as a percentage. 100 when there is nothing to answer.
    pub percentage: f64,
    /// `percentage >= min_score`.
    pub passed: bool,
}

/// A learning module: ordered steps plus the asset registry they draw on.
///
/// Built once from a payload. `steps` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub module_id: String,
    version: String,
    pub title: String,
    pub min_score: f64,
    pub estimated_time: f64,
    pub allowed_attempts: f64,
    pub format: Format,
    steps: Vec<Step>,
    assets: Assets,
}

impl Default for Model {
    fn default() -> Self {
        Self::with_defaults(&ModelDefaults::default())
    }
}

impl Model {
    /// A fresh module for authoring: random id, one empty text step.
    pub fn with_defaults(defaults: &ModelDefaults) -> Self {
        let step = Step {
            theme: defaults.theme.clone(),
            ..Step::default()
        };

        Self {
            module_id: random_token(MODULE_ID_LEN),
            version: migration::current_version().to_string(),
            title: defaults.title.clone(),
            min_score: defaults.min_score,
            estimated_time: defaults.estimated_time,
            allowed_attempts: defaults.allowed_attempts,
            format: Format::parse(&defaults.format),
            steps: vec![step],
            assets: Assets::new(),
        }
    }

    /// A fresh module seeded from the user's saved defaults.
    pub fn from_user_defaults() -> Self {
        Self::with_defaults(&ModelDefaults::load())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawModel = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawModel = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Build the model: assets first, then legacy migrations, then the steps in input order.
    pub fn from_raw(raw: RawModel) -> Result<Self> {
        let mut assets = Assets::from_raw(&raw.assets)?;
        let mut records = raw.steps.unwrap_or_default();
        let version = migration::migrate(&raw.version, &mut records, &mut assets)?;

        let mut steps: Vec<Step> = records.iter().map(Step::from_raw).collect();
        if steps.is_empty() {
            steps.push(Step::default());
        }

        Ok(Self {
            module_id: raw.module_id,
            version,
            title: raw.title,
            min_score: raw.min_score,
            estimated_time: raw.estimated_time,
            allowed_attempts: raw.allowed_attempts,
            format: raw
                .format
                .as_deref()
                .filter(|f| !f.is_empty())
                .map(Format::parse)
                .unwrap_or_default(),
            steps,
            assets,
        })
    }

    pub fn to_raw(&self) -> RawModel {
        RawModel {
            module_id: self.module_id.clone(),
            version: self.version.clone(),
            title: self.title.clone(),
            min_score: self.min_score,
            estimated_time: self.estimated_time,
            allowed_attempts: self.allowed_attempts,
            format: Some(self.format.as_str().to_string()),
            steps: Some(self.steps.iter().map(Step::to_raw).collect()),
            assets: self.assets.to_raw(),
        }
    }

    /// Serialize to the payload shape accepted by [`Model::from_json`].
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_raw())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_raw())?)
    }

    /// Schema version. Legacy documents report the version they were migrated to.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn step_by_id(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn step_index(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    /// Quiz steps in document order.
    pub fn quizzes(&self) -> Vec<&Step> {
        self.steps.iter().filter(|step| step.is_quiz()).collect()
    }

    pub fn first_quiz(&self) -> Option<&Step> {
        self.steps.iter().find(|step| step.is_quiz())
    }

    pub fn has_quiz(&self) -> bool {
        self.steps.iter().any(Step::is_quiz)
    }

    /// Every quiz question by id. On id collisions the later quiz wins.
    pub fn questions_by_id(&self) -> HashMap<&str, &Question> {
        let mut questions = HashMap::new();
        for quiz in self.steps.iter().filter_map(Step::quiz) {
            questions.extend(quiz.questions_by_id());
        }
        questions
    }

    /// Navigation view of the steps around `current_index`.
    pub fn window(&self, current_index: usize, range: usize) -> Vec<WindowEntry<&Step>> {
        navigation::window(&self.steps, current_index, range)
    }

    /// Navigation view using the configured window width.
    pub fn window_for(
        &self,
        current_index: usize,
        defaults: &ModelDefaults,
    ) -> Vec<WindowEntry<&Step>> {
        self.window(current_index, defaults.window_range)
    }

    /// Score `answers` (question id to submitted values) across all quizzes.
    ///
    /// Questions without an entry score 0 and count as wrong.
    pub fn evaluate(&self, answers: &HashMap<String, Vec<String>>) -> QuizResult {
        let by_id = self.questions_by_id();
        let total = by_id.len();
        let mut score = 0.0;
        let mut correct = 0;

        // Document order keeps the floating point sum stable between runs.
        let questions = self
            .steps
            .iter()
            .filter_map(Step::quiz)
            .flat_map(|quiz| quiz.questions())
            .filter(|q| by_id.get(q.id.as_str()).is_some_and(|kept| std::ptr::eq(*kept, *q)));

        for question in questions {
            let submitted = answers.get(&question.id).map(Vec::as_slice);
            score += question.score(submitted);
            if question.is_correct(submitted) {
                correct += 1;
            }
        }

        let percentage = if total == 0 {
            100.0
        } else {
            correct as f64 / total as f64 * 100.0
        };

        QuizResult {
            score,
            correct,
            total,
            percentage,
            passed: percentage >= self.min_score,
        }
    }

    /// Template values for a results page after `result`.
    pub fn result_params(&self, result: &QuizResult) -> TemplateParams {
        TemplateParams {
            min_score: Some(self.min_score),
            estimated_time: Some(self.estimated_time),
            score: Some(result.percentage),
            title: Some(self.title.clone()),
            success: result.passed,
            failed: !result.passed,
            ..TemplateParams::default()
        }
    }
}
