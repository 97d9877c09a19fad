//! Patient and medical-record value types.
//!
//! These are plain value-semantics structures: every mutation path in the
//! service constructs a new value from the current one and writes it back
//! under the same key. Nothing in this module mutates stored state in place.

use chrono::{DateTime, Utc};

/// One hospital patient, as held by the record store.
#[derive(Clone, Debug, PartialEq)]
pub struct Patient {
    /// Globally unique identifier, assigned at creation and immutable
    /// thereafter. Hyphenated lowercase UUID v4 text.
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    /// Whether the patient is currently admitted. `true` implies
    /// `admitted_at` is present.
    pub is_admitted: bool,
    pub admitted_at: Option<DateTime<Utc>>,
    pub discharged_at: Option<DateTime<Utc>>,
    /// Clinical entries in insertion order. Record ids are expected to be
    /// unique within this sequence but this is not enforced; lookups resolve
    /// against the first matching id.
    pub medical_records: Vec<MedicalRecord>,
}

impl Patient {
    /// Builds a freshly created patient: not admitted, no admission or
    /// discharge timestamps, records taken from the payload.
    pub fn create(id: String, payload: PatientPayload) -> Self {
        Self {
            id,
            name: payload.name,
            age: payload.age,
            gender: payload.gender,
            is_admitted: false,
            admitted_at: None,
            discharged_at: None,
            medical_records: payload.medical_records,
        }
    }

    /// Builds the updated value for this patient from a payload.
    ///
    /// The id, admission flag and both timestamps are preserved; name, age
    /// and gender are replaced, and the medical-record sequence is
    /// overwritten wholesale by the payload's sequence.
    pub fn with_payload(&self, payload: PatientPayload) -> Self {
        Self {
            id: self.id.clone(),
            name: payload.name,
            age: payload.age,
            gender: payload.gender,
            is_admitted: self.is_admitted,
            admitted_at: self.admitted_at,
            discharged_at: self.discharged_at,
            medical_records: payload.medical_records,
        }
    }
}

/// One clinical entry, always embedded in exactly one patient's
/// `medical_records` sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct MedicalRecord {
    /// Caller-supplied identifier, expected unique within the owning
    /// patient's sequence.
    pub id: String,
    /// Advisory reference to the owning patient; not validated against the
    /// patient it is attached to.
    pub patient_id: String,
    pub diagnosis: String,
    pub treatment: String,
    pub date: DateTime<Utc>,
}

/// Caller input for creating or updating a patient.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientPayload {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub medical_records: Vec<MedicalRecord>,
}
