//! Clinic Resource Facade
//!
//! Typed list/get/create/update/delete calls for the three backend
//! resources. The facade is a trait so page controllers can run against an
//! in-memory backend in tests; [`ClinicClient`] is the HTTP implementation.
//!
//! Appointment GET responses may carry populated patient/doctor records;
//! write payloads always use bare identifier strings.

use async_trait::async_trait;

use super::client::{ApiClient, ApiError};
use crate::models::{
    Appointment, AppointmentPayload, DeleteResponse, Doctor, DoctorPayload, Patient,
    PatientPayload,
};

/// Result alias for facade calls
pub type ApiResult<T> = Result<T, ApiError>;

/// The clinic backend's resource operations
#[async_trait]
pub trait ClinicApi: Send + Sync {
    // Patients
    async fn list_patients(&self) -> ApiResult<Vec<Patient>>;
    async fn get_patient(&self, id: &str) -> ApiResult<Patient>;
    async fn create_patient(&self, payload: &PatientPayload) -> ApiResult<Patient>;
    async fn update_patient(&self, id: &str, payload: &PatientPayload) -> ApiResult<Patient>;
    async fn delete_patient(&self, id: &str) -> ApiResult<DeleteResponse>;

    // Doctors
    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>>;
    async fn get_doctor(&self, id: &str) -> ApiResult<Doctor>;
    async fn create_doctor(&self, payload: &DoctorPayload) -> ApiResult<Doctor>;
    async fn update_doctor(&self, id: &str, payload: &DoctorPayload) -> ApiResult<Doctor>;
    async fn delete_doctor(&self, id: &str) -> ApiResult<DeleteResponse>;

    // Appointments
    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>>;
    async fn get_appointment(&self, id: &str) -> ApiResult<Appointment>;
    async fn create_appointment(&self, payload: &AppointmentPayload) -> ApiResult<Appointment>;
    async fn update_appointment(
        &self,
        id: &str,
        payload: &AppointmentPayload,
    ) -> ApiResult<Appointment>;
    async fn delete_appointment(&self, id: &str) -> ApiResult<DeleteResponse>;
}

/// HTTP implementation of [`ClinicApi`]
pub struct ClinicClient {
    api: ApiClient,
}

impl ClinicClient {
    /// Create a facade for the backend at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(base_url),
        }
    }

    /// The underlying HTTP client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[async_trait]
impl ClinicApi for ClinicClient {
    async fn list_patients(&self) -> ApiResult<Vec<Patient>> {
        self.api.get_json("/patients").await
    }

    async fn get_patient(&self, id: &str) -> ApiResult<Patient> {
        self.api.get_json(&format!("/patients/{id}")).await
    }

    async fn create_patient(&self, payload: &PatientPayload) -> ApiResult<Patient> {
        self.api.post_json("/patients", payload).await
    }

    async fn update_patient(&self, id: &str, payload: &PatientPayload) -> ApiResult<Patient> {
        self.api.put_json(&format!("/patients/{id}"), payload).await
    }

    async fn delete_patient(&self, id: &str) -> ApiResult<DeleteResponse> {
        self.api.delete_json(&format!("/patients/{id}")).await
    }

    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>> {
        self.api.get_json("/doctors").await
    }

    async fn get_doctor(&self, id: &str) -> ApiResult<Doctor> {
        self.api.get_json(&format!("/doctors/{id}")).await
    }

    async fn create_doctor(&self, payload: &DoctorPayload) -> ApiResult<Doctor> {
        self.api.post_json("/doctors", payload).await
    }

    async fn update_doctor(&self, id: &str, payload: &DoctorPayload) -> ApiResult<Doctor> {
        self.api.put_json(&format!("/doctors/{id}"), payload).await
    }

    async fn delete_doctor(&self, id: &str) -> ApiResult<DeleteResponse> {
        self.api.delete_json(&format!("/doctors/{id}")).await
    }

    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>> {
        self.api.get_json("/appointments").await
    }

    async fn get_appointment(&self, id: &str) -> ApiResult<Appointment> {
        self.api.get_json(&format!("/appointments/{id}")).await
    }

    async fn create_appointment(&self, payload: &AppointmentPayload) -> ApiResult<Appointment> {
        self.api.post_json("/appointments", payload).await
    }

    async fn update_appointment(
        &self,
        id: &str,
        payload: &AppointmentPayload,
    ) -> ApiResult<Appointment> {
        self.api
            .put_json(&format!("/appointments/{id}"), payload)
            .await
    }

    async fn delete_appointment(&self, id: &str) -> ApiResult<DeleteResponse> {
        self.api.delete_json(&format!("/appointments/{id}")).await
    }
}
