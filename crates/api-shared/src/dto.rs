//! JSON wire types for the Ward API.
//!
//! These structs define the request and response bodies exposed over HTTP,
//! with conversions to and from the `ward-core` value types. Field names on
//! the wire are the Rust snake_case names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A patient as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub is_admitted: bool,
    pub admitted_at: Option<DateTime<Utc>>,
    pub discharged_at: Option<DateTime<Utc>>,
    pub medical_records: Vec<MedicalRecord>,
}

/// A medical record as carried on the wire, both in requests and responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    pub diagnosis: String,
    pub treatment: String,
    pub date: DateTime<Utc>,
}

/// Request body for creating or updating a patient.
///
/// On update the `medical_records` sequence replaces the stored one
/// wholesale; callers that want to keep existing records must send them.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientPayloadReq {
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub medical_records: Vec<MedicalRecord>,
}

/// Response carrying a single patient.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub patient: Patient,
}

/// Response carrying a list of patients.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: Vec<Patient>,
}

/// Response carrying one patient's medical records.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MedicalRecordsRes {
    pub records: Vec<MedicalRecord>,
}

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned for every failed operation.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl From<ward_core::Patient> for Patient {
    fn from(p: ward_core::Patient) -> Self {
        Self {
            id: p.id,
            name: p.name,
            age: p.age,
            gender: p.gender,
            is_admitted: p.is_admitted,
            admitted_at: p.admitted_at,
            discharged_at: p.discharged_at,
            medical_records: p.medical_records.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ward_core::MedicalRecord> for MedicalRecord {
    fn from(r: ward_core::MedicalRecord) -> Self {
        Self {
            id: r.id,
            patient_id: r.patient_id,
            diagnosis: r.diagnosis,
            treatment: r.treatment,
            date: r.date,
        }
    }
}

impl From<MedicalRecord> for ward_core::MedicalRecord {
    fn from(r: MedicalRecord) -> Self {
        Self {
            id: r.id,
            patient_id: r.patient_id,
            diagnosis: r.diagnosis,
            treatment: r.treatment,
            date: r.date,
        }
    }
}

impl From<PatientPayloadReq> for ward_core::PatientPayload {
    fn from(req: PatientPayloadReq) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
            medical_records: req.medical_records.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_conversion_keeps_all_fields() {
        let core = ward_core::Patient {
            id: "id-1".into(),
            name: "Ann".into(),
            age: 30,
            gender: "F".into(),
            is_admitted: true,
            admitted_at: Some(Utc::now()),
            discharged_at: None,
            medical_records: vec![ward_core::MedicalRecord {
                id: "r1".into(),
                patient_id: "id-1".into(),
                diagnosis: "flu".into(),
                treatment: "rest".into(),
                date: Utc::now(),
            }],
        };

        let dto = Patient::from(core.clone());

        assert_eq!(dto.id, core.id);
        assert_eq!(dto.age, core.age);
        assert!(dto.is_admitted);
        assert_eq!(dto.admitted_at, core.admitted_at);
        assert_eq!(dto.medical_records.len(), 1);
        assert_eq!(dto.medical_records[0].diagnosis, "flu");
    }

    #[test]
    fn test_payload_req_defaults_to_empty_records() {
        let req: PatientPayloadReq =
            serde_json::from_str(r#"{"name":"Ann","age":30,"gender":"F"}"#)
                .expect("payload without records should deserialize");

        let payload = ward_core::PatientPayload::from(req);
        assert!(payload.medical_records.is_empty());
    }
}
