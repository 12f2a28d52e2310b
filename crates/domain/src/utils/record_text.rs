//! Behavior record text codec.
//!
//! The tracker offers exactly two general-purpose text fields per document
//! (title and body), so student name, id, classroom and the behavior text
//! are embedded in a fixed Thai Markdown template and recovered from it by
//! pattern extraction. The template is the only place these fields live;
//! there is no structured side channel.
//!
//! Decoding is best-effort and lossy by design: a missing or malformed
//! marker leaves the corresponding field unset, it never fails.

use chrono::{DateTime, Utc};

use crate::constants::{MARKER_BEHAVIOR_HEADER, MARKER_STUDENT_NUMBER, SECTION_HEADER_PREFIX};
use crate::types::RecordDraft;
use crate::utils::thai_date::format_thai_datetime;

/// Encoded document ready for the tracker's document surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument {
    pub title: String,
    pub body: String,
}

/// Fields recovered from a document title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedTitle {
    pub full_name: Option<String>,
    pub student_id: Option<String>,
    pub classroom: Option<String>,
}

/// Fields recovered from a document body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBody {
    pub student_number: Option<u32>,
    pub good_behavior: Option<String>,
}

/// Glyph prefixed to the document title, one per score value.
pub fn score_glyph(score: u8) -> &'static str {
    match score {
        2 => "🌟",
        3 => "✨",
        4 => "💫",
        5 => "🏆",
        _ => "⭐",
    }
}

/// Encode a draft into the document title and body.
pub fn encode(draft: &RecordDraft, school_name: &str, submitted: DateTime<Utc>) -> EncodedDocument {
    let title = format!(
        "{} {} ({}) - {}",
        score_glyph(draft.score),
        draft.full_name,
        draft.student_id,
        draft.classroom
    );

    let body = format!(
        "## 📝 รายละเอียดพฤติกรรมความดี\n\
         \n\
         ### 👤 ข้อมูลนักเรียน\n\
         - **รหัสนักเรียน:** {student_id}\n\
         - **เลขที่:** {student_number}\n\
         - **ชื่อ-นามสกุล:** {full_name}\n\
         - **ห้อง:** {classroom}\n\
         \n\
         {behavior_header}\n\
         {behavior}\n\
         \n\
         ### ⭐ การประเมิน\n\
         - **คะแนนที่ได้รับ:** {score} คะแนน\n\
         - **ครูผู้ลงทะเบียน:** {teacher}\n\
         - **วันที่ส่ง:** {submitted}\n\
         \n\
         ---\n\
         *ระบบลงทะเบียนพฤติกรรมความดี - {school}*\n",
        student_id = draft.student_id,
        student_number = draft.student_number,
        full_name = draft.full_name,
        classroom = draft.classroom,
        behavior_header = MARKER_BEHAVIOR_HEADER,
        behavior = draft.good_behavior,
        score = draft.score,
        teacher = draft.teacher_name,
        submitted = format_thai_datetime(submitted),
        school = school_name,
    );

    EncodedDocument { title, body }
}

/// Decode a document title of the shape
/// `"<prefix> <name> (<id>) - <classroom>"`.
///
/// The leading glyph token is discarded. A title that does not match the
/// shape decodes to a value with every field unset.
pub fn decode_title(title: &str) -> DecodedTitle {
    match split_title(title) {
        Some((full_name, student_id, classroom)) => DecodedTitle {
            full_name: Some(full_name),
            student_id: Some(student_id),
            classroom: Some(classroom),
        },
        None => DecodedTitle::default(),
    }
}

fn split_title(title: &str) -> Option<(String, String, String)> {
    let open = title.find(" (")?;
    let after_open = &title[open + 2..];
    let close = after_open.find(')')?;

    let student_id = after_open[..close].trim();
    let classroom = after_open[close + 1..].strip_prefix(" - ")?.trim();

    // Everything before the parenthesis is "<glyph> <name>"; the glyph is
    // the first whitespace-separated token.
    let (_, name) = title[..open].split_once(' ')?;
    let name = name.trim();

    if name.is_empty() || student_id.is_empty() || classroom.is_empty() {
        return None;
    }

    Some((name.to_string(), student_id.to_string(), classroom.to_string()))
}

/// Scan a document body for the student-number marker line and the behavior
/// section header; the behavior text is the line immediately following the
/// header.
pub fn decode_body(body: &str) -> DecodedBody {
    let lines: Vec<&str> = body.lines().collect();
    let mut decoded = DecodedBody::default();

    for (index, line) in lines.iter().enumerate() {
        if decoded.student_number.is_none() {
            if let Some(position) = line.find(MARKER_STUDENT_NUMBER) {
                let value = line[position + MARKER_STUDENT_NUMBER.len()..].trim();
                decoded.student_number = value.parse().ok();
            }
        }

        if decoded.good_behavior.is_none() && line.contains(MARKER_BEHAVIOR_HEADER) {
            decoded.good_behavior = lines
                .get(index + 1)
                .map(|next| next.trim().to_string())
                .filter(|next| !next.is_empty());
        }
    }

    decoded
}

/// Recover the full behavior text for reporting.
///
/// Unlike [`decode_body`], which takes only the line after the section
/// header, this walks the whole behavior section: every non-empty line up to
/// the next section header is trimmed and space-joined, so multi-line
/// entries survive into exports.
pub fn extract_behavior_section(body: &str) -> Option<String> {
    let mut in_section = false;
    let mut pieces: Vec<&str> = Vec::new();

    for line in body.lines() {
        if !in_section {
            if line.contains(MARKER_BEHAVIOR_HEADER) {
                in_section = true;
            }
            continue;
        }

        if line.starts_with(SECTION_HEADER_PREFIX) {
            break;
        }

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }

    if pieces.is_empty() {
        None
    } else {
        Some(pieces.join(" "))
    }
}
