use std::collections::HashMap;

use crate::domain::model::Model;

/// Runtime presentation flags for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepFlags {
    /// The learner may not move past this step yet.
    pub locked: bool,
    /// The step shows up in navigation.
    pub navigate: bool,
}

impl Default for StepFlags {
    fn default() -> Self {
        Self {
            locked: false,
            navigate: true,
        }
    }
}

/// Presentation state owned by the playback UI, keyed by step id.
///
/// Kept apart from [`Model`] so the parsed module stays immutable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationState {
    flags: HashMap<String, StepFlags>,
}

impl PresentationState {
    /// Initial flags for every step: quizzes locked, everything navigable.
    pub fn new(model: &Model) -> Self {
        let flags = model
            .steps()
            .iter()
            .map(|step| {
                let flags = StepFlags {
                    locked: step.locked_by_default(),
                    ..StepFlags::default()
                };
                (step.id.clone(), flags)
            })
            .collect();
        Self { flags }
    }

    /// Flags for `step_id`; unknown ids get the unlocked defaults.
    pub fn flags(&self, step_id: &str) -> StepFlags {
        self.flags.get(step_id).copied().unwrap_or_default()
    }

    pub fn is_locked(&self, step_id: &str) -> bool {
        self.flags(step_id).locked
    }

    pub fn can_navigate(&self, step_id: &str) -> bool {
        self.flags(step_id).navigate
    }

    pub fn set_locked(&mut self, step_id: &str, locked: bool) {
        self.flags.entry(step_id.to_string()).or_default().locked = locked;
    }

    pub fn set_navigate(&mut self, step_id: &str, navigate: bool) {
        self.flags.entry(step_id.to_string()).or_default().navigate = navigate;
    }

    /// Index of the first locked step in `model`, if any.
    pub fn first_locked_index(&self, model: &Model) -> Option<usize> {
        model.steps().iter().position(|step| self.is_locked(&step.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model::from_json(
            r#"{"steps": [
                {"id": "intro", "type": "text"},
                {"id": "check", "type": "quiz"},
                {"id": "outro", "type": "text"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_flags() {
        let state = PresentationState::new(&model());
        assert!(!state.is_locked("intro"));
        assert!(state.is_locked("check"));
        assert!(state.can_navigate("intro"));
        assert!(state.can_navigate("check"));
    }

    #[test]
    fn test_unknown_step_gets_defaults() {
        let state = PresentationState::new(&model());
        assert_eq!(state.flags("nope"), StepFlags::default());
    }

    #[test]
    fn test_unlock_and_hide() {
        let model = model();
        let mut state = PresentationState::new(&model);
        assert_eq!(state.first_locked_index(&model), Some(1));

        state.set_locked("check", false);
        state.set_navigate("outro", false);

        assert!(!state.is_locked("check"));
        assert!(!state.can_navigate("outro"));
        assert_eq!(state.first_locked_index(&model), None);
    }

    #[test]
    fn test_flags_do_not_touch_model() {
        let model = model();
        let before = model.clone();
        let mut state = PresentationState::new(&model);
        state.set_locked("intro", true);
        assert_eq!(model, before);
    }
}
