//! Generation request schema.
//!
//! Simple mode (`customMode = false`) only looks at the prompt and stops at
//! the first failing rule. Custom mode checks title, style, prompt and model
//! and reports every violation.

use crate::types::{GenerationInput, GenerationRequest, ModelTier, ModelVersion};

use super::rules::{char_len, evaluate_all, evaluate_first, trimmed, Rule, Violation};

/// Prompt ceiling in simple mode, independent of model.
pub const SIMPLE_PROMPT_LIMIT: usize = 400;
/// Title ceiling in custom mode.
pub const TITLE_LIMIT: usize = 80;

/// Trimmed view of a [`GenerationInput`] that the rules run against.
#[derive(Debug, Clone)]
pub(crate) struct GenerationDraft {
    pub custom_mode: bool,
    pub instrumental: bool,
    pub title: String,
    pub style: String,
    pub prompt: String,
    pub model_tag: Option<String>,
    pub negative_tags: String,
}

impl GenerationDraft {
    pub(crate) fn from_input(input: &GenerationInput) -> Self {
        Self {
            custom_mode: input.custom_mode.unwrap_or(false),
            instrumental: input.instrumental.unwrap_or(false),
            title: trimmed(&input.title),
            style: trimmed(&input.style),
            prompt: trimmed(&input.prompt),
            model_tag: input
                .model
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
            negative_tags: trimmed(&input.negative_tags),
        }
    }

    /// Parsed model; `None` when a tag was given but is not recognised.
    pub(crate) fn model(&self) -> Option<ModelVersion> {
        match &self.model_tag {
            None => Some(ModelVersion::default()),
            Some(tag) => ModelVersion::parse(tag),
        }
    }

    /// Tier used for length ceilings. An unknown tag falls back to the default
    /// model so the length rules still run next to the model violation.
    fn tier(&self) -> ModelTier {
        self.model().unwrap_or_default().tier()
    }

    fn model_label(&self) -> &'static str {
        self.model().unwrap_or_default().as_str()
    }

    pub(crate) fn into_request(self) -> GenerationRequest {
        if !self.custom_mode {
            return GenerationRequest::simple(self.prompt);
        }
        GenerationRequest {
            custom_mode: true,
            instrumental: self.instrumental,
            model: self.model().unwrap_or_default(),
            title: self.title,
            style: self.style,
            prompt: self.prompt,
            negative_tags: self.negative_tags,
        }
    }
}

pub(crate) fn model_list() -> String {
    ModelVersion::ALL
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Rule sets
// ---------------------------------------------------------------------------

const SIMPLE_RULES: &[Rule<GenerationDraft>] = &[
    Rule {
        field: "prompt",
        name: "required",
        check: |d| d.prompt.is_empty().then(|| "Prompt is required".to_string()),
    },
    Rule {
        field: "prompt",
        name: "max_length",
        check: |d| {
            (char_len(&d.prompt) > SIMPLE_PROMPT_LIMIT).then(|| {
                format!("Prompt must be at most {SIMPLE_PROMPT_LIMIT} characters in simple mode")
            })
        },
    },
];

pub(crate) const TITLE_REQUIRED: Rule<GenerationDraft> = Rule {
    field: "title",
    name: "required",
    check: |d| {
        d.title
            .is_empty()
            .then(|| "Title is required in custom mode".to_string())
    },
};

pub(crate) const TITLE_MAX_LENGTH: Rule<GenerationDraft> = Rule {
    field: "title",
    name: "max_length",
    check: |d| {
        (char_len(&d.title) > TITLE_LIMIT)
            .then(|| format!("Title must be at most {TITLE_LIMIT} characters"))
    },
};

pub(crate) const STYLE_REQUIRED: Rule<GenerationDraft> = Rule {
    field: "style",
    name: "required",
    check: |d| {
        d.style
            .is_empty()
            .then(|| "Style is required in custom mode".to_string())
    },
};

pub(crate) const PROMPT_REQUIRED_UNLESS_INSTRUMENTAL: Rule<GenerationDraft> = Rule {
    field: "prompt",
    name: "required",
    check: |d| {
        (!d.instrumental && d.prompt.is_empty())
            .then(|| "Prompt is required in custom mode unless instrumental is set".to_string())
    },
};

pub(crate) const MODEL_KNOWN: Rule<GenerationDraft> = Rule {
    field: "model",
    name: "enum",
    check: |d| {
        d.model()
            .is_none()
            .then(|| format!("Model must be one of: {}", model_list()))
    },
};

const CUSTOM_RULES: &[Rule<GenerationDraft>] = &[
    TITLE_REQUIRED,
    TITLE_MAX_LENGTH,
    STYLE_REQUIRED,
    Rule {
        field: "style",
        name: "max_length",
        check: |d| {
            let limit = d.tier().style_limit();
            (char_len(&d.style) > limit).then(|| {
                format!(
                    "Style must be at most {limit} characters for model {}",
                    d.model_label()
                )
            })
        },
    },
    PROMPT_REQUIRED_UNLESS_INSTRUMENTAL,
    Rule {
        field: "prompt",
        name: "max_length",
        check: |d| {
            let limit = d.tier().prompt_limit();
            (char_len(&d.prompt) > limit).then(|| {
                format!(
                    "Prompt must be at most {limit} characters for model {}",
                    d.model_label()
                )
            })
        },
    },
    MODEL_KNOWN,
];

/// Validate and normalize generation parameters.
///
/// In simple mode every field except `prompt` is discarded.
pub fn validate_generation(input: &GenerationInput) -> Result<GenerationRequest, Vec<Violation>> {
    let draft = GenerationDraft::from_input(input);
    let violations = if draft.custom_mode {
        evaluate_all(CUSTOM_RULES, &draft)
    } else {
        evaluate_first(SIMPLE_RULES, &draft)
    };

    if violations.is_empty() {
        Ok(draft.into_request())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(title: &str, style: &str, prompt: &str) -> GenerationInput {
        GenerationInput {
            custom_mode: Some(true),
            title: Some(title.into()),
            style: Some(style.into()),
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    fn fields(violations: &[Violation]) -> Vec<(&str, &str)> {
        violations
            .iter()
            .map(|v| (v.field.as_str(), v.rule.as_str()))
            .collect()
    }

    // -- Simple mode --

    #[test]
    fn simple_mode_accepts_short_prompt_and_blanks_other_fields() {
        let input = GenerationInput {
            prompt: Some("  lofi chill beat ".into()),
            title: Some("ignored".into()),
            style: Some("x".repeat(5000)),
            model: Some("not-a-model".into()),
            instrumental: Some(true),
            negative_tags: Some("metal".into()),
            ..Default::default()
        };
        let request = validate_generation(&input).unwrap();
        assert_eq!(request, GenerationRequest::simple("lofi chill beat"));
    }

    #[test]
    fn simple_mode_requires_prompt() {
        let err = validate_generation(&GenerationInput::default()).unwrap_err();
        assert_eq!(fields(&err), vec![("prompt", "required")]);
        assert_eq!(err[0].message, "Prompt is required");
    }

    #[test]
    fn simple_mode_whitespace_prompt_is_empty() {
        let input = GenerationInput {
            prompt: Some("   ".into()),
            ..Default::default()
        };
        assert!(validate_generation(&input).is_err());
    }

    #[test]
    fn simple_mode_prompt_limit_is_400() {
        let ok = GenerationInput {
            prompt: Some("a".repeat(400)),
            ..Default::default()
        };
        assert!(validate_generation(&ok).is_ok());

        let too_long = GenerationInput {
            prompt: Some("a".repeat(401)),
            ..Default::default()
        };
        let err = validate_generation(&too_long).unwrap_err();
        assert_eq!(fields(&err), vec![("prompt", "max_length")]);
    }

    // -- Custom mode --

    #[test]
    fn custom_mode_accepts_complete_request() {
        let mut input = custom("Night Drive", "synthwave", "[Verse] neon lights");
        input.model = Some("V4".into());
        input.negative_tags = Some("heavy metal".into());
        let request = validate_generation(&input).unwrap();
        assert!(request.custom_mode);
        assert_eq!(request.model, ModelVersion::V4);
        assert_eq!(request.title, "Night Drive");
        assert_eq!(request.negative_tags, "heavy metal");
    }

    #[test]
    fn custom_mode_collects_every_violation() {
        let err = validate_generation(&GenerationInput {
            custom_mode: Some(true),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            fields(&err),
            vec![
                ("title", "required"),
                ("style", "required"),
                ("prompt", "required"),
            ]
        );
    }

    #[test]
    fn instrumental_relaxes_prompt_requirement() {
        let mut input = custom("Ambient", "drone", "");
        input.instrumental = Some(true);
        assert!(validate_generation(&input).is_ok());
    }

    #[test]
    fn title_longer_than_80_is_rejected() {
        let err = validate_generation(&custom(&"t".repeat(81), "pop", "words")).unwrap_err();
        assert_eq!(fields(&err), vec![("title", "max_length")]);
    }

    #[test]
    fn small_tier_limits_style_and_prompt() {
        for model in ["V3_5", "V4"] {
            let mut input = custom("t", &"s".repeat(201), &"p".repeat(3001));
            input.model = Some(model.into());
            let err = validate_generation(&input).unwrap_err();
            assert_eq!(
                fields(&err),
                vec![("style", "max_length"), ("prompt", "max_length")],
                "model {model}"
            );
        }
    }

    #[test]
    fn large_tier_allows_longer_style_and_prompt() {
        for model in ["V4_5", "V4_5PLUS", "V5"] {
            let mut input = custom("t", &"s".repeat(1000), &"p".repeat(5000));
            input.model = Some(model.into());
            assert!(validate_generation(&input).is_ok(), "model {model}");

            input.style = Some("s".repeat(1001));
            input.prompt = Some("p".repeat(5001));
            let err = validate_generation(&input).unwrap_err();
            assert_eq!(err.len(), 2, "model {model}");
        }
    }

    #[test]
    fn unknown_model_is_reported_in_custom_mode() {
        let mut input = custom("t", "s", "p");
        input.model = Some("V9".into());
        let err = validate_generation(&input).unwrap_err();
        assert_eq!(fields(&err), vec![("model", "enum")]);
        assert!(err[0].message.contains("V4_5PLUS"));
    }

    #[test]
    fn validation_is_deterministic() {
        let input = GenerationInput {
            custom_mode: Some(true),
            title: Some("x".repeat(90)),
            ..Default::default()
        };
        assert_eq!(validate_generation(&input), validate_generation(&input));
    }
}
