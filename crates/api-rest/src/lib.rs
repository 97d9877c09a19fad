//! # API REST
//!
//! REST API implementation for Ward.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation via utoipa
//! - REST-specific concerns (JSON serialization, status mapping)
//!
//! Uses `api-shared` for the wire types and `ward-core` for all semantics.
//!
//! The host execution model is one call at a time against the service state;
//! this surface mirrors that split by taking a read lock for read-only calls
//! and a write lock for mutating calls.

#![warn(rust_2018_idioms)]

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::{IntoParams, OpenApi};

use api_shared::HealthService;
use api_shared::dto::{
    ErrorRes, HealthRes, ListPatientsRes, MedicalRecord, MedicalRecordsRes, Patient,
    PatientPayloadReq, PatientRes,
};
use ward_core::{PatientError, PatientService};

/// Application state shared across REST API handlers.
///
/// Holds the single `PatientService` instance behind a read/write lock.
#[derive(Clone)]
pub struct AppState {
    service: Arc<RwLock<PatientService>>,
}

impl AppState {
    pub fn new(service: PatientService) -> Self {
        Self {
            service: Arc::new(RwLock::new(service)),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_patients,
        create_patient,
        search_patients,
        get_patient,
        update_patient,
        delete_patient,
        admit_patient,
        discharge_patient,
        list_medical_records,
        add_medical_record,
        update_medical_record,
        delete_medical_record
    ),
    components(schemas(
        HealthRes,
        Patient,
        MedicalRecord,
        PatientPayloadReq,
        PatientRes,
        ListPatientsRes,
        MedicalRecordsRes,
        ErrorRes
    ))
)]
pub struct ApiDoc;

/// Builds the REST router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/search", get(search_patients))
        .route(
            "/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/patients/:id/admit", post(admit_patient))
        .route("/patients/:id/discharge", post(discharge_patient))
        .route(
            "/patients/:id/records",
            get(list_medical_records).post(add_medical_record),
        )
        .route(
            "/patients/:id/records/:record_id",
            put(update_medical_record).delete(delete_medical_record),
        )
        .with_state(state)
}

type ApiError = (StatusCode, Json<ErrorRes>);

/// Maps the core error taxonomy onto HTTP statuses.
///
/// Validation errors are 400, missing patients/records 404, admission state
/// conflicts 409. The body always carries the human-readable message.
fn error_response(err: PatientError) -> ApiError {
    let status = match &err {
        PatientError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PatientError::NotFound(_) | PatientError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
        PatientError::AlreadyAdmitted(_) | PatientError::NotAdmitted(_) => StatusCode::CONFLICT,
    };

    tracing::debug!(error = %err, status = %status, "request rejected");

    (
        status,
        Json(ErrorRes {
            error: err.to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "List of all patients", body = ListPatientsRes)
    )
)]
/// List all patients in the system.
async fn list_patients(State(state): State<AppState>) -> Json<ListPatientsRes> {
    let service = state.service.read().await;
    let patients = service.get_patients().into_iter().map(Into::into).collect();
    Json(ListPatientsRes { patients })
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = PatientPayloadReq,
    responses(
        (status = 201, description = "Patient created", body = PatientRes),
        (status = 400, description = "Missing required fields", body = ErrorRes)
    )
)]
/// Create a new patient record.
///
/// The identifier is generated by the service; the patient starts not
/// admitted with both timestamps absent.
async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<PatientPayloadReq>,
) -> Result<(StatusCode, Json<PatientRes>), ApiError> {
    let mut service = state.service.write().await;
    let patient = service.add_patient(req.into()).map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(PatientRes {
            patient: patient.into(),
        }),
    ))
}

/// Query parameters for patient name search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive substring to match against patient names.
    #[serde(default)]
    pub q: String,
}

#[utoipa::path(
    get,
    path = "/patients/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Patients whose name matches the query", body = ListPatientsRes)
    )
)]
/// Search patients by name, case-insensitively.
async fn search_patients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ListPatientsRes> {
    let service = state.service.read().await;
    let patients = service
        .search_patients(&params.q)
        .into_iter()
        .map(Into::into)
        .collect();
    Json(ListPatientsRes { patients })
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = PatientRes),
        (status = 400, description = "Invalid id", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Get a single patient by id.
async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientRes>, ApiError> {
    let service = state.service.read().await;
    let patient = service.get_patient(&id).map_err(error_response)?;

    Ok(Json(PatientRes {
        patient: patient.into(),
    }))
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    request_body = PatientPayloadReq,
    responses(
        (status = 200, description = "Updated patient", body = PatientRes),
        (status = 400, description = "Invalid id or missing fields", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Update a patient's caller-supplied fields.
///
/// The medical-record sequence in the body replaces the stored one wholesale.
async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PatientPayloadReq>,
) -> Result<Json<PatientRes>, ApiError> {
    let mut service = state.service.write().await;
    let patient = service
        .update_patient(&id, req.into())
        .map_err(error_response)?;

    Ok(Json(PatientRes {
        patient: patient.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id (must have UUID shape)")),
    responses(
        (status = 200, description = "Removed patient", body = PatientRes),
        (status = 400, description = "Id does not have UUID shape", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Delete a patient.
///
/// The id must have the canonical UUID shape; malformed ids are rejected
/// before the store is consulted.
async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientRes>, ApiError> {
    let mut service = state.service.write().await;
    let patient = service.delete_patient(&id).map_err(error_response)?;

    Ok(Json(PatientRes {
        patient: patient.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/admit",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Admitted patient", body = PatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 409, description = "Patient already admitted", body = ErrorRes)
    )
)]
/// Admit a patient, stamping the admission time.
async fn admit_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientRes>, ApiError> {
    let mut service = state.service.write().await;
    let patient = service.admit_patient(&id).map_err(error_response)?;

    Ok(Json(PatientRes {
        patient: patient.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/discharge",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Discharged patient", body = PatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 409, description = "Patient not currently admitted", body = ErrorRes)
    )
)]
/// Discharge a patient, stamping the discharge time.
async fn discharge_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientRes>, ApiError> {
    let mut service = state.service.write().await;
    let patient = service.discharge_patient(&id).map_err(error_response)?;

    Ok(Json(PatientRes {
        patient: patient.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/records",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient's medical records", body = MedicalRecordsRes),
        (status = 400, description = "Invalid id", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// List one patient's medical records in insertion order.
async fn list_medical_records(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MedicalRecordsRes>, ApiError> {
    let service = state.service.read().await;
    let records = service
        .get_medical_records(&id)
        .map_err(error_response)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(MedicalRecordsRes { records }))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/records",
    params(("id" = String, Path, description = "Patient id")),
    request_body = MedicalRecord,
    responses(
        (status = 201, description = "Patient with the record appended", body = PatientRes),
        (status = 400, description = "Invalid id", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Append a medical record to a patient's sequence.
async fn add_medical_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(record): Json<MedicalRecord>,
) -> Result<(StatusCode, Json<PatientRes>), ApiError> {
    let mut service = state.service.write().await;
    let patient = service
        .add_medical_record(&id, record.into())
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(PatientRes {
            patient: patient.into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/patients/{id}/records/{record_id}",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("record_id" = String, Path, description = "Medical record id")
    ),
    request_body = MedicalRecord,
    responses(
        (status = 200, description = "Patient with the record replaced", body = PatientRes),
        (status = 400, description = "Invalid ids", body = ErrorRes),
        (status = 404, description = "Patient or record not found", body = ErrorRes)
    )
)]
/// Replace the first record matching `record_id`, preserving its position.
async fn update_medical_record(
    State(state): State<AppState>,
    Path((id, record_id)): Path<(String, String)>,
    Json(record): Json<MedicalRecord>,
) -> Result<Json<PatientRes>, ApiError> {
    let mut service = state.service.write().await;
    let patient = service
        .update_medical_record(&id, &record_id, record.into())
        .map_err(error_response)?;

    Ok(Json(PatientRes {
        patient: patient.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}/records/{record_id}",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("record_id" = String, Path, description = "Medical record id")
    ),
    responses(
        (status = 200, description = "Patient with the record removed", body = PatientRes),
        (status = 400, description = "Invalid ids", body = ErrorRes),
        (status = 404, description = "Patient or record not found", body = ErrorRes)
    )
)]
/// Remove the first record matching `record_id`.
async fn delete_medical_record(
    State(state): State<AppState>,
    Path((id, record_id)): Path<(String, String)>,
) -> Result<Json<PatientRes>, ApiError> {
    let mut service = state.service.write().await;
    let patient = service
        .delete_medical_record(&id, &record_id)
        .map_err(error_response)?;

    Ok(Json(PatientRes {
        patient: patient.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use http_body_util::BodyExt;
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use tower::util::ServiceExt;
    use ward_core::CoreConfig;
    use ward_core::ident::is_uuid_shaped;

    fn test_app() -> Router {
        let cfg = Arc::new(CoreConfig::new(Some(7)));
        router(AppState::new(PatientService::new(cfg)))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request should build")
    }

    async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("body should be valid JSON")
    }

    fn ann_payload() -> serde_json::Value {
        json!({"name": "Ann", "age": 30, "gender": "F", "medical_records": []})
    }

    async fn create_ann(app: &Router) -> Patient {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/patients", ann_payload()))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::CREATED);

        let res: PatientRes = body_json(response).await;
        res.patient
    }

    #[tokio::test]
    async fn test_health_endpoint_reports_alive() {
        let app = test_app();
        let response = app
            .oneshot(empty_request("GET", "/health"))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::OK);
        let res: HealthRes = body_json(response).await;
        assert!(res.ok);
    }

    #[tokio::test]
    async fn test_create_patient_returns_created_patient() {
        let app = test_app();
        let patient = create_ann(&app).await;

        assert!(is_uuid_shaped(&patient.id));
        assert_eq!(patient.name, "Ann");
        assert!(!patient.is_admitted);
        assert!(patient.admitted_at.is_none());
    }

    #[tokio::test]
    async fn test_create_patient_with_missing_fields_is_bad_request() {
        let app = test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/patients",
                json!({"name": "", "age": 0, "gender": "F"}),
            ))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let res: ErrorRes = body_json(response).await;
        assert!(res.error.contains("missing required fields"));
    }

    #[tokio::test]
    async fn test_get_unknown_patient_is_not_found() {
        let app = test_app();
        let response = app
            .oneshot(empty_request("GET", "/patients/nobody"))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admission_flow_over_http() {
        let app = test_app();
        let patient = create_ann(&app).await;

        let admit_uri = format!("/patients/{}/admit", patient.id);
        let response = app
            .clone()
            .oneshot(empty_request("POST", &admit_uri))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);
        let res: PatientRes = body_json(response).await;
        assert!(res.patient.is_admitted);
        assert!(res.patient.admitted_at.is_some());

        // Second admission conflicts with the current state.
        let response = app
            .clone()
            .oneshot(empty_request("POST", &admit_uri))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(empty_request(
                "POST",
                &format!("/patients/{}/discharge", patient.id),
            ))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);
        let res: PatientRes = body_json(response).await;
        assert!(!res.patient.is_admitted);
        assert!(res.patient.discharged_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_with_malformed_id_is_bad_request() {
        let app = test_app();
        create_ann(&app).await;

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", "/patients/not-a-uuid"))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // The store must be untouched.
        let response = app
            .clone()
            .oneshot(empty_request("GET", "/patients"))
            .await
            .expect("request should succeed");
        let res: ListPatientsRes = body_json(response).await;
        assert_eq!(res.patients.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let app = test_app();
        let patient = create_ann(&app).await;

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/patients/{}", patient.id)))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/patients/{}", patient.id)))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_matches_case_insensitively() {
        let app = test_app();
        create_ann(&app).await;
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/patients",
                json!({"name": "Ben", "age": 40, "gender": "M"}),
            ))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/patients/search?q=AN"))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);
        let res: ListPatientsRes = body_json(response).await;
        assert_eq!(res.patients.len(), 1);
        assert_eq!(res.patients[0].name, "Ann");
    }

    #[tokio::test]
    async fn test_medical_record_flow_over_http() {
        let app = test_app();
        let patient = create_ann(&app).await;
        let records_uri = format!("/patients/{}/records", patient.id);

        let record = json!({
            "id": "r1",
            "patient_id": patient.id,
            "diagnosis": "flu",
            "treatment": "rest",
            "date": "2026-08-23T10:00:00Z"
        });

        let response = app
            .clone()
            .oneshot(json_request("POST", &records_uri, record))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(empty_request("GET", &records_uri))
            .await
            .expect("request should succeed");
        let res: MedicalRecordsRes = body_json(response).await;
        assert_eq!(res.records.len(), 1);
        assert_eq!(res.records[0].diagnosis, "flu");

        let replacement = json!({
            "id": "r1",
            "patient_id": patient.id,
            "diagnosis": "pneumonia",
            "treatment": "antibiotics",
            "date": "2026-08-24T10:00:00Z"
        });
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("{}/r1", records_uri),
                replacement,
            ))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);
        let res: PatientRes = body_json(response).await;
        assert_eq!(res.patient.medical_records[0].diagnosis, "pneumonia");

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("{}/r1", records_uri)))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);
        let res: PatientRes = body_json(response).await;
        assert!(res.patient.medical_records.is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_medical_record_is_not_found() {
        let app = test_app();
        let patient = create_ann(&app).await;

        let record = json!({
            "id": "ghost",
            "patient_id": patient.id,
            "diagnosis": "flu",
            "treatment": "rest",
            "date": "2026-08-23T10:00:00Z"
        });
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/patients/{}/records/ghost", patient.id),
                record,
            ))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let res: ErrorRes = body_json(response).await;
        assert!(res.error.contains("ghost"));
    }
}
