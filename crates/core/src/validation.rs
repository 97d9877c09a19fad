//! Input validation utilities.
//!
//! Validation failures are always reported as [`PatientError::InvalidInput`]
//! with a message naming the offending field, and are detected before any
//! store access.

use crate::error::{PatientError, PatientResult};
use crate::patient::PatientPayload;

/// Validates an externally supplied patient identifier.
///
/// Every id-taking operation except deletion accepts any non-empty string;
/// deletion additionally requires the UUID shape (see
/// [`crate::ident::is_uuid_shaped`]).
///
/// # Errors
///
/// Returns [`PatientError::InvalidInput`] if the id is empty or
/// whitespace-only.
pub fn validate_patient_id(id: &str) -> PatientResult<()> {
    if id.trim().is_empty() {
        return Err(PatientError::InvalidInput(
            "patient id cannot be empty".into(),
        ));
    }
    Ok(())
}

/// Validates an externally supplied medical-record identifier.
///
/// # Errors
///
/// Returns [`PatientError::InvalidInput`] if the id is empty or
/// whitespace-only.
pub fn validate_record_id(id: &str) -> PatientResult<()> {
    if id.trim().is_empty() {
        return Err(PatientError::InvalidInput(
            "medical record id cannot be empty".into(),
        ));
    }
    Ok(())
}

/// Validates the caller-supplied fields of a patient payload.
///
/// Name and gender must contain at least one non-whitespace character and
/// age must be non-zero.
///
/// # Errors
///
/// Returns [`PatientError::InvalidInput`] naming the missing fields.
pub fn validate_payload(payload: &PatientPayload) -> PatientResult<()> {
    let mut missing = Vec::new();

    if payload.name.trim().is_empty() {
        missing.push("name");
    }
    if payload.age == 0 {
        missing.push("age");
    }
    if payload.gender.trim().is_empty() {
        missing.push("gender");
    }

    if !missing.is_empty() {
        return Err(PatientError::InvalidInput(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}
