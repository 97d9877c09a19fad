//! Patient service and operation layer.
//!
//! This module provides the main service for patient operations: creation,
//! lookup, update, admission state transitions, deletion, name search, and
//! the nested medical-record sub-operations.
//!
//! Every mutation follows the same copy-on-write pattern: read the current
//! value from the store, construct a new value, and write it back under the
//! unchanged key. Medical records have no storage of their own; the four
//! record sub-operations re-fetch the owning patient, transform its sequence,
//! and store the whole patient again.
//!
//! Operations never retry: each call is a single attempt whose outcome is
//! surfaced as a [`PatientResult`].

use crate::config::CoreConfig;
use crate::error::{PatientError, PatientResult};
use crate::ident::{self, IdGenerator, SecureIdGenerator, SeededIdGenerator};
use crate::patient::{MedicalRecord, Patient, PatientPayload};
use crate::store::PatientStore;
use crate::validation::{validate_patient_id, validate_payload, validate_record_id};
use chrono::Utc;
use std::sync::Arc;

/// Pure patient data operations - no API concerns
pub struct PatientService {
    store: PatientStore,
    ids: Box<dyn IdGenerator>,
}

impl PatientService {
    /// Creates a new service with an empty store.
    ///
    /// The identifier source is selected by the configuration: a seeded
    /// deterministic generator when `id_seed` is set, otherwise the secure
    /// OS-backed generator.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let ids: Box<dyn IdGenerator> = match cfg.id_seed() {
            Some(seed) => Box::new(SeededIdGenerator::new(seed)),
            None => Box::new(SecureIdGenerator::new()),
        };

        Self {
            store: PatientStore::new(),
            ids,
        }
    }

    /// Creates a new patient from the payload and stores it.
    ///
    /// A fresh identifier is generated; the patient starts not admitted with
    /// both timestamps absent and the payload's medical records.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] if required payload fields are
    /// missing (empty name or gender, zero age).
    pub fn add_patient(&mut self, payload: PatientPayload) -> PatientResult<Patient> {
        validate_payload(&payload)?;

        let id = self.ids.new_id();
        let patient = Patient::create(id.clone(), payload);

        // Key uniqueness rests on the generator contract; a collision would
        // be absorbed by insert-overwrite rather than surfaced as an error.
        self.store.insert(id, patient.clone());
        tracing::debug!(patient_id = %patient.id, "patient created");

        Ok(patient)
    }

    /// Returns all stored patients in the store's iteration order.
    ///
    /// The order is key order and carries no business meaning.
    pub fn get_patients(&self) -> Vec<Patient> {
        self.store.values()
    }

    /// Returns a clone of the patient at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] for an empty id and
    /// [`PatientError::NotFound`] when no patient is stored under it.
    pub fn get_patient(&self, id: &str) -> PatientResult<Patient> {
        validate_patient_id(id)?;
        self.store
            .get(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))
    }

    /// Replaces the caller-supplied fields of an existing patient.
    ///
    /// The id, admission flag and both timestamps are preserved. The
    /// medical-record sequence is overwritten wholesale by the payload's
    /// sequence, so callers that want to keep existing records must supply
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] for an empty id or missing
    /// payload fields, [`PatientError::NotFound`] if the patient does not
    /// exist.
    pub fn update_patient(&mut self, id: &str, payload: PatientPayload) -> PatientResult<Patient> {
        validate_patient_id(id)?;
        validate_payload(&payload)?;

        let current = self
            .store
            .get(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))?;

        let updated = current.with_payload(payload);
        self.store.insert(updated.id.clone(), updated.clone());
        tracing::debug!(patient_id = %updated.id, "patient updated");

        Ok(updated)
    }

    /// Marks the patient as admitted and stamps the admission time.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::NotFound`] if the patient does not exist and
    /// [`PatientError::AlreadyAdmitted`] if they are already admitted.
    pub fn admit_patient(&mut self, id: &str) -> PatientResult<Patient> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))?;

        if current.is_admitted {
            return Err(PatientError::AlreadyAdmitted(id.to_string()));
        }

        let admitted = Patient {
            is_admitted: true,
            admitted_at: Some(Utc::now()),
            ..current
        };
        self.store.insert(admitted.id.clone(), admitted.clone());
        tracing::debug!(patient_id = %admitted.id, "patient admitted");

        Ok(admitted)
    }

    /// Marks the patient as discharged and stamps the discharge time.
    ///
    /// The historical `admitted_at` timestamp is kept.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::NotFound`] if the patient does not exist and
    /// [`PatientError::NotAdmitted`] if they are not currently admitted.
    pub fn discharge_patient(&mut self, id: &str) -> PatientResult<Patient> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))?;

        if !current.is_admitted {
            return Err(PatientError::NotAdmitted(id.to_string()));
        }

        let discharged = Patient {
            is_admitted: false,
            discharged_at: Some(Utc::now()),
            ..current
        };
        self.store.insert(discharged.id.clone(), discharged.clone());
        tracing::debug!(patient_id = %discharged.id, "patient discharged");

        Ok(discharged)
    }

    /// Removes the patient at `id`, returning the removed value.
    ///
    /// Deletion is the one operation that requires the id to have the
    /// canonical UUID shape before the store is consulted; ids that fail the
    /// shape check never touch the store. There is no soft delete.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] for an id without the UUID
    /// shape and [`PatientError::NotFound`] when nothing is stored under it.
    pub fn delete_patient(&mut self, id: &str) -> PatientResult<Patient> {
        if !ident::is_uuid_shaped(id) {
            return Err(PatientError::InvalidInput(format!(
                "patient id '{}' does not have the expected UUID shape (8-4-4-4-12 hex groups)",
                id
            )));
        }

        let removed = self
            .store
            .remove(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))?;
        tracing::debug!(patient_id = %removed.id, "patient deleted");

        Ok(removed)
    }

    /// Returns the patients whose name contains `query`, case-insensitively.
    ///
    /// An empty result is a valid outcome, not an error. An empty query
    /// matches every patient.
    pub fn search_patients(&self, query: &str) -> Vec<Patient> {
        let needle = query.to_lowercase();
        self.store
            .values()
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Appends a medical record to the patient's sequence.
    ///
    /// The record's `patient_id` field is advisory and is not checked against
    /// the owning patient.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] for an empty patient id and
    /// [`PatientError::NotFound`] if the patient does not exist.
    pub fn add_medical_record(
        &mut self,
        patient_id: &str,
        record: MedicalRecord,
    ) -> PatientResult<Patient> {
        validate_patient_id(patient_id)?;

        let current = self
            .store
            .get(patient_id)
            .ok_or_else(|| PatientError::NotFound(patient_id.to_string()))?;

        let mut medical_records = current.medical_records.clone();
        medical_records.push(record);

        let updated = Patient {
            medical_records,
            ..current
        };
        self.store.insert(updated.id.clone(), updated.clone());
        tracing::debug!(patient_id = %updated.id, "medical record added");

        Ok(updated)
    }

    /// Replaces the first record matching `record_id` in place.
    ///
    /// Sequence length and element position are preserved. When duplicate
    /// record ids exist, only the first match is affected.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] for empty ids,
    /// [`PatientError::NotFound`] if the patient does not exist, and
    /// [`PatientError::RecordNotFound`] if no record carries `record_id`.
    pub fn update_medical_record(
        &mut self,
        patient_id: &str,
        record_id: &str,
        new_record: MedicalRecord,
    ) -> PatientResult<Patient> {
        validate_patient_id(patient_id)?;
        validate_record_id(record_id)?;

        let current = self
            .store
            .get(patient_id)
            .ok_or_else(|| PatientError::NotFound(patient_id.to_string()))?;

        let position = current
            .medical_records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| PatientError::RecordNotFound {
                patient_id: patient_id.to_string(),
                record_id: record_id.to_string(),
            })?;

        let mut medical_records = current.medical_records.clone();
        medical_records[position] = new_record;

        let updated = Patient {
            medical_records,
            ..current
        };
        self.store.insert(updated.id.clone(), updated.clone());
        tracing::debug!(
            patient_id = %updated.id,
            record_id,
            "medical record updated"
        );

        Ok(updated)
    }

    /// Removes the first record matching `record_id` from the sequence.
    ///
    /// # Errors
    ///
    /// Same cases as [`PatientService::update_medical_record`].
    pub fn delete_medical_record(
        &mut self,
        patient_id: &str,
        record_id: &str,
    ) -> PatientResult<Patient> {
        validate_patient_id(patient_id)?;
        validate_record_id(record_id)?;

        let current = self
            .store
            .get(patient_id)
            .ok_or_else(|| PatientError::NotFound(patient_id.to_string()))?;

        let position = current
            .medical_records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| PatientError::RecordNotFound {
                patient_id: patient_id.to_string(),
                record_id: record_id.to_string(),
            })?;

        let mut medical_records = current.medical_records.clone();
        medical_records.remove(position);

        let updated = Patient {
            medical_records,
            ..current
        };
        self.store.insert(updated.id.clone(), updated.clone());
        tracing::debug!(
            patient_id = %updated.id,
            record_id,
            "medical record deleted"
        );

        Ok(updated)
    }

    /// Returns a clone of the patient's medical-record sequence.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] for an empty patient id and
    /// [`PatientError::NotFound`] if the patient does not exist.
    pub fn get_medical_records(&self, patient_id: &str) -> PatientResult<Vec<MedicalRecord>> {
        validate_patient_id(patient_id)?;
        let patient = self
            .store
            .get(patient_id)
            .ok_or_else(|| PatientError::NotFound(patient_id.to_string()))?;

        Ok(patient.medical_records)
    }
}
