//! Cover-start request schema.
//!
//! Requires a well-formed http(s) source URL and the same custom-mode
//! title/style rules as generation. There are no prompt or style length
//! ceilings for covers. All rules run; every violation is reported.

use url::Url;

use crate::types::{CoverInput, CoverRequest};

use super::generation::{
    GenerationDraft, MODEL_KNOWN, PROMPT_REQUIRED_UNLESS_INSTRUMENTAL, STYLE_REQUIRED,
    TITLE_MAX_LENGTH, TITLE_REQUIRED,
};
use super::rules::{evaluate_all, trimmed, Rule, Violation};

struct CoverDraft {
    upload_url: String,
    params: GenerationDraft,
}

fn is_http_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

const COVER_RULES: &[Rule<CoverDraft>] = &[
    Rule {
        field: "uploadUrl",
        name: "required",
        check: |d| {
            d.upload_url
                .is_empty()
                .then(|| "Upload URL is required".to_string())
        },
    },
    Rule {
        field: "uploadUrl",
        name: "url",
        check: |d| {
            (!d.upload_url.is_empty() && !is_http_url(&d.upload_url))
                .then(|| "Upload URL must be a valid http or https URL".to_string())
        },
    },
    Rule {
        field: "prompt",
        name: "required",
        check: |d| {
            (!d.params.custom_mode && d.params.prompt.is_empty())
                .then(|| "Prompt is required".to_string())
        },
    },
    Rule {
        field: "title",
        name: "required",
        check: |d| custom_only(d, TITLE_REQUIRED.check),
    },
    Rule {
        field: "title",
        name: "max_length",
        check: |d| custom_only(d, TITLE_MAX_LENGTH.check),
    },
    Rule {
        field: "style",
        name: "required",
        check: |d| custom_only(d, STYLE_REQUIRED.check),
    },
    Rule {
        field: "prompt",
        name: "required",
        check: |d| custom_only(d, PROMPT_REQUIRED_UNLESS_INSTRUMENTAL.check),
    },
    Rule {
        field: "model",
        name: "enum",
        check: |d| custom_only(d, MODEL_KNOWN.check),
    },
];

fn custom_only(
    draft: &CoverDraft,
    check: fn(&GenerationDraft) -> Option<String>,
) -> Option<String> {
    if draft.params.custom_mode {
        check(&draft.params)
    } else {
        None
    }
}

/// Validate and normalize cover parameters.
pub fn validate_cover(input: &CoverInput) -> Result<CoverRequest, Vec<Violation>> {
    let draft = CoverDraft {
        upload_url: trimmed(&input.upload_url),
        params: GenerationDraft::from_input(&input.params),
    };

    let violations = evaluate_all(COVER_RULES, &draft);
    if violations.is_empty() {
        Ok(CoverRequest {
            upload_url: draft.upload_url,
            params: draft.params.into_request(),
        })
    } else {
        Err(violations)
    }
}
