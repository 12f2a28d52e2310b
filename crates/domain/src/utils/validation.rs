//! Draft validation against the configured school and input limits.
//!
//! The UI layer validates as the teacher types; this layer validates again
//! before anything is sent to the tracker, because the config owns the
//! authoritative limits and classroom table.

use crate::config::Config;
use crate::constants::{
    SCORE_MAX, SCORE_MIN, STUDENT_ID_MAX_DIGITS, STUDENT_ID_MIN_DIGITS, STUDENT_NUMBER_MAX,
};
use crate::errors::{MeritSyncError, Result};
use crate::types::RecordDraft;

/// Whether a student id is 5-10 ASCII digits.
pub fn is_valid_student_id(student_id: &str) -> bool {
    (STUDENT_ID_MIN_DIGITS..=STUDENT_ID_MAX_DIGITS).contains(&student_id.len())
        && student_id.chars().all(|c| c.is_ascii_digit())
}

/// Validate a draft before it is encoded and sent to the tracker.
///
/// # Errors
/// Returns `MeritSyncError::InvalidInput` naming the first offending field.
pub fn validate_draft(draft: &RecordDraft, config: &Config) -> Result<()> {
    if !is_valid_student_id(&draft.student_id) {
        return Err(MeritSyncError::InvalidInput(format!(
            "student id must be {STUDENT_ID_MIN_DIGITS}-{STUDENT_ID_MAX_DIGITS} digits, got {:?}",
            draft.student_id
        )));
    }

    if draft.student_number < 1 || draft.student_number > STUDENT_NUMBER_MAX {
        return Err(MeritSyncError::InvalidInput(format!(
            "student number must be 1-{STUDENT_NUMBER_MAX}, got {}",
            draft.student_number
        )));
    }

    let name_length = draft.full_name.trim().chars().count();
    if name_length == 0 || name_length > config.limits.max_name_length {
        return Err(MeritSyncError::InvalidInput(format!(
            "full name must be 1-{} characters",
            config.limits.max_name_length
        )));
    }

    if !config.school.contains_classroom(&draft.classroom) {
        return Err(MeritSyncError::InvalidInput(format!(
            "classroom {:?} is not configured for this school",
            draft.classroom
        )));
    }

    let behavior_length = draft.good_behavior.trim().chars().count();
    if behavior_length == 0 || behavior_length > config.limits.max_behavior_length {
        return Err(MeritSyncError::InvalidInput(format!(
            "behavior text must be 1-{} characters",
            config.limits.max_behavior_length
        )));
    }

    if !(SCORE_MIN..=SCORE_MAX).contains(&draft.score) {
        return Err(MeritSyncError::InvalidInput(format!(
            "score must be {SCORE_MIN}-{SCORE_MAX}, got {}",
            draft.score
        )));
    }

    if draft.teacher_name.trim().is_empty() {
        return Err(MeritSyncError::InvalidInput("teacher name must not be empty".to_string()));
    }

    Ok(())
}
