/// Minimum raw character count for both the resume and the job description.
pub const MIN_FIELD_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(&'static str),
}

/// Checks the draft before any network call.
///
/// Rules run in a fixed order and the first failure wins: both emptiness
/// checks come before either length check, resume before job description.
/// Emptiness ignores surrounding whitespace; length counts the raw text.
pub fn validate(resume_text: &str, job_description: &str) -> ValidationOutcome {
    if resume_text.trim().is_empty() {
        return ValidationOutcome::Invalid("Please enter your resume text");
    }
    if job_description.trim().is_empty() {
        return ValidationOutcome::Invalid("Please enter the job description");
    }
    if resume_text.chars().count() < MIN_FIELD_CHARS {
        return ValidationOutcome::Invalid("Resume text must be at least 50 characters long");
    }
    if job_description.chars().count() < MIN_FIELD_CHARS {
        return ValidationOutcome::Invalid("Job description must be at least 50 characters long");
    }
    ValidationOutcome::Valid
}
