//! Form payload validation and normalization

use crate::contract::{NewSubmission, RegistryError, SubmissionPayload, UploadedFiles};

/// Option value meaning "the real value is in the matching override field"
pub const OTHER_SENTINEL: &str = "Other";

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Names (as the form sends them) of required fields that are absent or blank
pub fn missing_required_fields(
    payload: &SubmissionPayload,
    require_detection_io: bool,
) -> Vec<&'static str> {
    let mut checks = vec![
        ("intersectionName", &payload.intersection_name),
        ("city", &payload.city),
        ("state", &payload.state),
        ("endUser", &payload.end_user),
        ("distributor", &payload.distributor),
        ("cabinetType", &payload.cabinet_type),
        ("tlsConnection", &payload.tls_connection),
    ];
    if require_detection_io {
        checks.push(("detectionIO", &payload.detection_io));
    }

    checks
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
}

/// Fail with a validation error naming every missing required field
pub fn check_required(
    payload: &SubmissionPayload,
    require_detection_io: bool,
) -> Result<(), RegistryError> {
    let missing = missing_required_fields(payload, require_detection_io);
    if missing.is_empty() {
        return Ok(());
    }
    Err(RegistryError::validation(format!(
        "Missing required fields: {}",
        missing.join(", ")
    )))
}

/// Substitute the override when `value` is the "Other" sentinel.
///
/// A blank or absent override keeps the raw value.
pub fn resolve_other(value: String, override_value: Option<String>) -> String {
    if value != OTHER_SENTINEL {
        return value;
    }
    match override_value {
        Some(custom) if !custom.trim().is_empty() => custom,
        _ => value,
    }
}

/// Merge free phasing text with an uploaded file reference
pub fn embed_phasing(text: Option<String>, file: Option<&str>) -> Option<String> {
    let text = text.filter(|t| !t.trim().is_empty());
    match (text, file) {
        (Some(text), Some(file)) => Some(format!("{text} | File: {file}")),
        (None, Some(file)) => Some(format!("File: {file}")),
        (Some(text), None) => Some(text),
        (None, None) => None,
    }
}

/// Timing plans carry the file reference when one was uploaded, else any free text
pub fn embed_timing_plans(text: Option<String>, file: Option<&str>) -> Option<String> {
    match file {
        Some(file) => Some(format!("File: {file}")),
        None => text.filter(|t| !t.trim().is_empty()),
    }
}

/// Validate a raw payload and turn it into a record ready for insertion
pub fn normalize_submission(
    payload: SubmissionPayload,
    files: &UploadedFiles,
    require_detection_io: bool,
) -> Result<NewSubmission, RegistryError> {
    check_required(&payload, require_detection_io)?;

    let detection_io = payload
        .detection_io
        .filter(|v| !v.trim().is_empty())
        .map(|v| resolve_other(v, payload.other_detection_io));

    Ok(NewSubmission {
        intersection_name: payload.intersection_name.unwrap_or_default(),
        city: payload.city.unwrap_or_default(),
        state: payload.state.unwrap_or_default(),
        end_user: payload.end_user.unwrap_or_default(),
        distributor: resolve_other(
            payload.distributor.unwrap_or_default(),
            payload.other_distributor,
        ),
        cabinet_type: resolve_other(
            payload.cabinet_type.unwrap_or_default(),
            payload.other_cabinet_type,
        ),
        tls_connection: resolve_other(
            payload.tls_connection.unwrap_or_default(),
            payload.other_tls_connection,
        ),
        detection_io,
        phasing: embed_phasing(payload.phasing_text, files.phasing_file.as_deref()),
        timing_plans: embed_timing_plans(payload.timing_plans, files.timing_plans_file.as_deref()),
    })
}
