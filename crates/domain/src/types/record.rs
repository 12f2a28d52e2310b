//! Behavior record types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED, STATUS_UNDER_REVIEW, STATUS_UNKNOWN,
};
use crate::impl_domain_status_conversions;

/// Review workflow status, driven by the tracker's status field.
///
/// The intended workflow is pending → under-review → approved or rejected,
/// with approved/rejected terminal. The transition graph is a convention of
/// the reviewing teachers, not something this layer enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl_domain_status_conversions!(RecordStatus {
    Pending => "pending",
    UnderReview => "under-review",
    Approved => "approved",
    Rejected => "rejected",
});

impl RecordStatus {
    /// The option label this status carries on the tracker's status field.
    pub fn option_label(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::UnderReview => STATUS_UNDER_REVIEW,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    /// Match a tracker option name back to a status.
    ///
    /// Option names may carry decorations around the label (e.g. an emoji
    /// prefix), so matching is by substring. Unrecognized names yield `None`.
    pub fn from_option_name(name: &str) -> Option<Self> {
        [Self::Pending, Self::UnderReview, Self::Approved, Self::Rejected]
            .into_iter()
            .find(|status| name.contains(status.option_label()))
    }

    /// Human-readable Thai label, with a fixed fallback for unknown status.
    pub fn display_label(status: Option<Self>) -> &'static str {
        status.map_or(STATUS_UNKNOWN, Self::option_label)
    }
}

/// Validated input for a new behavior record, as submitted by a teacher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDraft {
    pub student_id: String,
    pub student_number: u32,
    pub full_name: String,
    /// `"<grade>/<room>"`, e.g. `"4/2"`
    pub classroom: String,
    pub good_behavior: String,
    pub score: u8,
    pub teacher_name: String,
}

/// Identifiers linking a record to its tracker document and project item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerLink {
    /// Opaque id of the project item wrapping the document
    pub item_id: String,
    /// Opaque node id of the underlying document
    pub document_id: String,
    /// Human-facing document number
    pub document_number: i64,
    pub url: String,
}

/// Composite behavior record as read back from the tracker.
///
/// Every field except the item id is optional: field values may be unset on
/// the tracker and the text decode is best-effort, so a record is assembled
/// from whatever survives the round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorRecord {
    pub item_id: String,
    pub document_id: Option<String>,
    pub document_number: Option<i64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub state: Option<String>,
    pub url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    pub student_id: Option<String>,
    pub student_number: Option<u32>,
    pub full_name: Option<String>,
    pub classroom: Option<String>,
    pub good_behavior: Option<String>,

    pub score: Option<f64>,
    pub teacher_name: Option<String>,
    pub submitted_date: Option<NaiveDate>,
    pub status: Option<RecordStatus>,
}

impl BehaviorRecord {
    /// Build the record returned by a successful create, before the tracker
    /// has been read back.
    pub fn from_draft(draft: &RecordDraft, link: &TrackerLink, submitted: NaiveDate) -> Self {
        Self {
            item_id: link.item_id.clone(),
            document_id: Some(link.document_id.clone()),
            document_number: Some(link.document_number),
            url: Some(link.url.clone()),
            student_id: Some(draft.student_id.clone()),
            student_number: Some(draft.student_number),
            full_name: Some(draft.full_name.clone()),
            classroom: Some(draft.classroom.clone()),
            good_behavior: Some(draft.good_behavior.clone()),
            score: Some(f64::from(draft.score)),
            teacher_name: Some(draft.teacher_name.clone()),
            submitted_date: Some(submitted),
            status: Some(RecordStatus::Pending),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_option_name_matches_decorated_labels() {
        assert_eq!(RecordStatus::from_option_name("รออนุมัติ"), Some(RecordStatus::Pending));
        assert_eq!(RecordStatus::from_option_name("✅ อนุมัติแล้ว"), Some(RecordStatus::Approved));
        assert_eq!(RecordStatus::from_option_name("❌ ไม่อนุมัติ"), Some(RecordStatus::Rejected));
        assert_eq!(
            RecordStatus::from_option_name("กำลังตรวจสอบ"),
            Some(RecordStatus::UnderReview)
        );
        assert_eq!(RecordStatus::from_option_name("Done"), None);
    }

    #[test]
    fn display_label_falls_back_for_unknown() {
        assert_eq!(RecordStatus::display_label(Some(RecordStatus::Approved)), "อนุมัติแล้ว");
        assert_eq!(RecordStatus::display_label(None), "ไม่ทราบสถานะ");
    }

    #[test]
    fn status_string_roundtrip() {
        use std::str::FromStr;

        assert_eq!(RecordStatus::UnderReview.to_string(), "under-review");
        assert_eq!(RecordStatus::from_str("PENDING").unwrap(), RecordStatus::Pending);
    }

    #[test]
    fn from_draft_carries_linkage_and_pending_status() {
        let draft = RecordDraft {
            student_id: "123456".into(),
            student_number: 12,
            full_name: "เด็กชายสมชาย ใจดี".into(),
            classroom: "4/2".into(),
            good_behavior: "ช่วยครูถือของ".into(),
            score: 5,
            teacher_name: "ครูสมศรี".into(),
        };
        let link = TrackerLink {
            item_id: "PVTI_item1".into(),
            document_id: "I_node1".into(),
            document_number: 42,
            url: "https://tracker.example/42".into(),
        };

        let record = BehaviorRecord::from_draft(&draft, &link, NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());

        assert_eq!(record.item_id, "PVTI_item1");
        assert_eq!(record.document_number, Some(42));
        assert_eq!(record.score, Some(5.0));
        assert_eq!(record.status, Some(RecordStatus::Pending));
    }
}
