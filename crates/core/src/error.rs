//! Error taxonomy for patient operations.
//!
//! Every service operation returns a [`PatientResult`] so that callers always
//! receive a well-formed result rather than an aborted call. Messages are
//! human-readable and name the offending identifier or condition; there are
//! no error codes beyond the variant itself.

/// Errors surfaced by patient and medical-record operations.
#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    /// Malformed or missing input, detected before any store access.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The referenced patient is not present in the store.
    #[error("patient with id '{0}' does not exist")]
    NotFound(String),
    /// The referenced medical record is not present in the patient's sequence.
    #[error("medical record '{record_id}' not found for patient '{patient_id}'")]
    RecordNotFound {
        patient_id: String,
        record_id: String,
    },
    /// Admission requested for a patient who is already admitted.
    #[error("patient '{0}' is already admitted")]
    AlreadyAdmitted(String),
    /// Discharge requested for a patient who is not currently admitted.
    #[error("patient '{0}' is not currently admitted")]
    NotAdmitted(String),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
