//! Schema for generate-wait-upload requests: generation fields plus the
//! file host destination.

use crate::types::{GenerationRequest, UploadInput, UploadTarget};

use super::generation::validate_generation;
use super::rules::{evaluate_all, trimmed, Rule, Violation};

struct TargetDraft {
    upload_path: String,
    file_name: String,
}

const TARGET_RULES: &[Rule<TargetDraft>] = &[Rule {
    field: "kieUploadPath",
    name: "required",
    check: |d| {
        d.upload_path
            .is_empty()
            .then(|| "Upload path is required".to_string())
    },
}];

/// Validate generation parameters and the upload destination together.
///
/// Violations from both parts are reported in one list, generation first.
pub fn validate_upload(
    input: &UploadInput,
) -> Result<(GenerationRequest, UploadTarget), Vec<Violation>> {
    let target = TargetDraft {
        upload_path: trimmed(&input.kie_upload_path),
        file_name: trimmed(&input.kie_file_name),
    };
    let target_violations = evaluate_all(TARGET_RULES, &target);

    match validate_generation(&input.params) {
        Ok(request) if target_violations.is_empty() => Ok((
            request,
            UploadTarget {
                upload_path: target.upload_path,
                file_name: (!target.file_name.is_empty()).then_some(target.file_name),
            },
        )),
        Ok(_) => Err(target_violations),
        Err(mut violations) => {
            violations.extend(target_violations);
            Err(violations)
        }
    }
}
