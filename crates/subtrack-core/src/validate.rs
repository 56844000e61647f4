//! Input validation for subscriptions and their attachments
//!
//! Applied on the create/edit path only. Records arriving from the
//! gateway are taken as-is, matching the tolerant read side.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::models::{Attachment, Subscription};

pub const MAX_ATTACHMENTS: usize = 2;
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "image/jpeg",
    "image/png",
];

/// Maximum digits in a subscriber mobile number
pub const MAX_MOBILE_DIGITS: usize = 11;

/// Strip a mobile number down to its digits, capped at
/// [`MAX_MOBILE_DIGITS`].
pub fn normalize_mobile(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_MOBILE_DIGITS)
        .collect()
}

/// Decode an attachment payload. Accepts either a bare base64 string or
/// a full data URL (`data:{mime};base64,{payload}`).
pub fn decode_attachment_data(data: &str) -> Result<Vec<u8>> {
    let payload = match data.find("base64,") {
        Some(idx) => &data[idx + "base64,".len()..],
        None => data,
    };
    STANDARD
        .decode(payload)
        .map_err(|e| Error::InvalidData(format!("Attachment is not valid base64: {}", e)))
}

/// Build an attachment from raw bytes, storing a data URL the way the
/// web client does
pub fn attachment_from_bytes(name: &str, mime_type: &str, bytes: &[u8]) -> Attachment {
    Attachment {
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        data: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
    }
}

/// SHA-256 digest of the decoded attachment content, hex encoded.
/// Identical payloads share a digest regardless of file name.
pub fn attachment_digest(att: &Attachment) -> Result<String> {
    let bytes = decode_attachment_data(&att.data)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Check one attachment: allowed MIME type, non-empty name, decoded
/// payload within the size cap.
pub fn validate_attachment(att: &Attachment) -> Result<()> {
    if att.name.trim().is_empty() {
        return Err(Error::InvalidData("Attachment name cannot be empty".to_string()));
    }
    if !ALLOWED_MIME_TYPES.contains(&att.mime_type.as_str()) {
        return Err(Error::InvalidData(format!(
            "Unsupported file type ({}). Allowed: PDF, DOCX, DOC, JPEG, PNG",
            att.mime_type
        )));
    }
    let bytes = decode_attachment_data(&att.data)?;
    if bytes.len() > MAX_ATTACHMENT_BYTES {
        return Err(Error::InvalidData(format!(
            "File \"{}\" is too large. Max size is {}MB",
            att.name,
            MAX_ATTACHMENT_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Check an attachment list: count cap plus each member.
pub fn validate_attachments(attachments: &[Attachment]) -> Result<()> {
    if attachments.len() > MAX_ATTACHMENTS {
        return Err(Error::InvalidData(format!(
            "Maximum of {} attachments allowed",
            MAX_ATTACHMENTS
        )));
    }
    for att in attachments {
        validate_attachment(att)?;
    }
    Ok(())
}

/// Field checks applied before a save. Mirrors the required fields of
/// the entry form.
pub fn validate_subscription(sub: &Subscription) -> Result<()> {
    if sub.name.trim().is_empty() {
        return Err(Error::InvalidData("Subscription name is required".to_string()));
    }
    if sub.department.trim().is_empty() {
        return Err(Error::InvalidData("Department is required".to_string()));
    }
    if sub.category.trim().is_empty() {
        return Err(Error::InvalidData("Category is required".to_string()));
    }
    if !sub.regular_price.is_finite() || sub.regular_price < 0.0 {
        return Err(Error::InvalidData(
            "Regular price must be a non-negative number".to_string(),
        ));
    }
    if !sub.trial_price.is_finite() || sub.trial_price < 0.0 {
        return Err(Error::InvalidData(
            "Trial price must be a non-negative number".to_string(),
        ));
    }
    if sub.subscriber.first_name.trim().is_empty() || sub.subscriber.last_name.trim().is_empty() {
        return Err(Error::InvalidData("Subscriber name is required".to_string()));
    }
    if sub.subscriber.email.trim().is_empty() {
        return Err(Error::InvalidData("Subscriber email is required".to_string()));
    }
    let mobile = &sub.subscriber.mobile;
    if mobile.len() > MAX_MOBILE_DIGITS || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidData(format!(
            "Mobile must be at most {} digits",
            MAX_MOBILE_DIGITS
        )));
    }
    let last_four = &sub.payment.last_four;
    if !last_four.is_empty()
        && (last_four.len() != 4 || !last_four.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(Error::InvalidData(
            "Card last-4 must be exactly 4 digits".to_string(),
        ));
    }
    validate_attachments(&sub.attachments)?;
    Ok(())
}
