//! # Ward Core
//!
//! Core business logic for the Ward hospital patient record service.
//!
//! This crate contains pure data operations over an ordered in-memory record
//! store:
//! - Patient CRUD, admission/discharge state transitions and name search
//! - Nested medical-record operations applied copy-on-write per patient
//! - Identifier generation with a pluggable randomness source
//!
//! **No API concerns**: HTTP servers, JSON wire shapes, or OpenAPI
//! documentation belong in `api-rest` and `api-shared`.

pub mod config;
pub mod error;
pub mod ident;
pub mod patient;
pub mod service;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use error::{PatientError, PatientResult};
pub use ident::{IdGenerator, SecureIdGenerator, SeededIdGenerator};
pub use patient::{MedicalRecord, Patient, PatientPayload};
pub use service::PatientService;
pub use store::PatientStore;
