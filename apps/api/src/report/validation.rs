use std::path::Path;

use thiserror::Error;

use crate::report::submission::{FormSubmission, ATTACHMENT_EXTENSIONS, INDUSTRIES, STATES};

/// Why a submission cannot be turned into a report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),

    #[error("Unknown state of operation: {0}")]
    UnknownState(String),

    #[error(
        "Unsupported attachment type: {}. Allowed types: {}",
        .0,
        ATTACHMENT_EXTENSIONS.join(", ")
    )]
    UnsupportedAttachment(String),
}

/// Checks the required fields, the two selection values and the attachment
/// file types.
///
/// Missing fields are all reported at once, in form order. Whitespace-only
/// values count as missing.
pub fn validate_submission(submission: &FormSubmission) -> Result<(), SubmissionError> {
    let required = [
        ("full name", &submission.full_name),
        ("email", &submission.email),
        ("phone", &submission.phone),
        ("business goals", &submission.business_goals),
    ];

    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();

    if !missing.is_empty() {
        return Err(SubmissionError::MissingRequired(missing));
    }

    if !INDUSTRIES.contains(&submission.industry.as_str()) {
        return Err(SubmissionError::UnknownIndustry(submission.industry.clone()));
    }

    if !STATES.contains(&submission.state.as_str()) {
        return Err(SubmissionError::UnknownState(submission.state.clone()));
    }

    if let Some(name) = submission
        .attachments
        .iter()
        .find(|name| !is_allowed_attachment(name))
    {
        return Err(SubmissionError::UnsupportedAttachment(name.clone()));
    }

    Ok(())
}

fn is_allowed_attachment(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ATTACHMENT_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
