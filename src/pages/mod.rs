//! Page Controllers
//!
//! One controller per backend resource plus the dashboard. Each controller
//! exclusively owns its list, search, form, and mode state; the host invokes
//! [`load`] once per page activation and renders from the accessors. Every
//! mutation is followed by an authoritative re-fetch, never an optimistic
//! update.
//!
//! [`load`]: PatientsPage::load

mod appointments;
mod dashboard;
mod doctors;
mod patients;

pub use appointments::{AppointmentForm, AppointmentsPage};
pub use dashboard::{Dashboard, DashboardCounts};
pub use doctors::{DoctorForm, DoctorsPage};
pub use patients::{PatientForm, PatientsPage};

use async_trait::async_trait;

/// Create vs Edit form mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No record selected; submit creates
    Create,
    /// Form pre-populated from the record with this id; submit updates
    Edit(String),
}

impl Mode {
    /// Identifier being edited, if any
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Mode::Create => None,
            Mode::Edit(id) => Some(id),
        }
    }
}

/// Kind of the inline status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Inline status message shown near the form or table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    fn info() -> Self {
        Self {
            kind: MessageKind::Info,
            text: String::new(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    /// Whether there is anything to render
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::info()
    }
}

/// Interactive confirmation for destructive actions.
///
/// Injected into controllers so non-interactive hosts and tests can script
/// the answer instead of prompting.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation that always answers yes (`--yes` flows)
pub struct AutoConfirm;

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Case-insensitive substring match across a record's searched fields.
///
/// An empty or whitespace-only query matches everything.
pub(crate) fn matches_query(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}


#[cfg(test)]
pub(crate) mod testing {
    //! In-memory backend and scripted confirmation for controller tests.

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::api::{ApiError, ApiResult, ClinicApi};
    use crate::models::{
        Appointment, AppointmentPayload, DeleteResponse, Doctor, DoctorPayload, Linked, Patient,
        PatientPayload,
    };

    use super::Confirm;

    /// Scripted confirmation capability
    pub struct ScriptedConfirm {
        answer: bool,
        asked: AtomicBool,
    }

    impl ScriptedConfirm {
        pub fn answering(answer: bool) -> Self {
            Self {
                answer,
                asked: AtomicBool::new(false),
            }
        }

        pub fn was_asked(&self) -> bool {
            self.asked.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Confirm for ScriptedConfirm {
        async fn confirm(&self, _prompt: &str) -> bool {
            self.asked.store(true, Ordering::SeqCst);
            self.answer
        }
    }

    #[derive(Default)]
    struct FakeState {
        patients: Vec<Patient>,
        doctors: Vec<Doctor>,
        appointments: Vec<Appointment>,
        next_id: u64,
        fail_patients: bool,
        fail_doctors: bool,
        fail_appointments: bool,
        requests: Vec<String>,
    }

    /// In-memory [`ClinicApi`] with per-collection failure switches and a
    /// request log for asserting which calls were made
    #[derive(Default)]
    pub struct FakeBackend {
        state: Mutex<FakeState>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed_patient(&self, name: &str, email: &str) -> Patient {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let patient = Patient {
                id: format!("p{}", state.next_id),
                name: name.to_string(),
                birth_date: Utc::now(),
                email: email.to_string(),
                phone: None,
                created_at: None,
                updated_at: None,
            };
            state.patients.push(patient.clone());
            patient
        }

        pub fn seed_doctor(&self, name: &str, specialty: Option<&str>) -> Doctor {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let doctor = Doctor {
                id: format!("d{}", state.next_id),
                name: name.to_string(),
                specialty: specialty.map(str::to_string),
                created_at: None,
                updated_at: None,
            };
            state.doctors.push(doctor.clone());
            doctor
        }

        /// Seed an appointment with populated references, as the backend
        /// returns them on GET
        pub fn seed_appointment(
            &self,
            patient: &Patient,
            doctor: &Doctor,
            notes: Option<&str>,
        ) -> Appointment {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let start = Utc::now();
            let appointment = Appointment {
                id: format!("a{}", state.next_id),
                patient_id: Linked::Embedded(patient.clone()),
                doctor_id: Linked::Embedded(doctor.clone()),
                start_at: start,
                end_at: start + chrono::Duration::minutes(30),
                notes: notes.map(str::to_string),
                created_at: None,
                updated_at: None,
            };
            state.appointments.push(appointment.clone());
            appointment
        }

        pub fn fail_patients(&self) {
            self.state.lock().unwrap().fail_patients = true;
        }

        pub fn fail_doctors(&self) {
            self.state.lock().unwrap().fail_doctors = true;
        }

        pub fn fail_appointments(&self) {
            self.state.lock().unwrap().fail_appointments = true;
        }

        pub fn requests(&self) -> Vec<String> {
            self.state.lock().unwrap().requests.clone()
        }

        fn record(&self, request: impl Into<String>) {
            self.state.lock().unwrap().requests.push(request.into());
        }

        fn failure(resource: &str) -> ApiError {
            ApiError::Backend {
                status: 500,
                message: format!("{resource} fetch failed"),
            }
        }

        fn not_found(resource: &str, id: &str) -> ApiError {
            ApiError::Backend {
                status: 404,
                message: format!("{resource} {id} not found"),
            }
        }
    }

    #[async_trait]
    impl ClinicApi for FakeBackend {
        async fn list_patients(&self) -> ApiResult<Vec<Patient>> {
            self.record("GET /patients");
            let state = self.state.lock().unwrap();
            if state.fail_patients {
                return Err(Self::failure("patients"));
            }
            Ok(state.patients.clone())
        }

        async fn get_patient(&self, id: &str) -> ApiResult<Patient> {
            self.record(format!("GET /patients/{id}"));
            let state = self.state.lock().unwrap();
            state
                .patients
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| Self::not_found("patient", id))
        }

        async fn create_patient(&self, payload: &PatientPayload) -> ApiResult<Patient> {
            self.record("POST /patients");
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let patient = Patient {
                id: format!("p{}", state.next_id),
                name: payload.name.clone(),
                birth_date: payload.birth_date,
                email: payload.email.clone(),
                phone: payload.phone.clone(),
                created_at: Some(Utc::now()),
                updated_at: Some(Utc::now()),
            };
            state.patients.push(patient.clone());
            Ok(patient)
        }

        async fn update_patient(&self, id: &str, payload: &PatientPayload) -> ApiResult<Patient> {
            self.record(format!("PUT /patients/{id}"));
            let mut state = self.state.lock().unwrap();
            let patient = state
                .patients
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| Self::not_found("patient", id))?;
            patient.name = payload.name.clone();
            patient.birth_date = payload.birth_date;
            patient.email = payload.email.clone();
            patient.phone = payload.phone.clone();
            Ok(patient.clone())
        }

        async fn delete_patient(&self, id: &str) -> ApiResult<DeleteResponse> {
            self.record(format!("DELETE /patients/{id}"));
            let mut state = self.state.lock().unwrap();
            let before = state.patients.len();
            state.patients.retain(|p| p.id != id);
            if state.patients.len() == before {
                return Err(Self::not_found("patient", id));
            }
            Ok(DeleteResponse {
                message: "Patient deleted".to_string(),
            })
        }

        async fn list_doctors(&self) -> ApiResult<Vec<Doctor>> {
            self.record("GET /doctors");
            let state = self.state.lock().unwrap();
            if state.fail_doctors {
                return Err(Self::failure("doctors"));
            }
            Ok(state.doctors.clone())
        }

        async fn get_doctor(&self, id: &str) -> ApiResult<Doctor> {
            self.record(format!("GET /doctors/{id}"));
            let state = self.state.lock().unwrap();
            state
                .doctors
                .iter()
                .find(|d| d.id == id)
                .cloned()
                .ok_or_else(|| Self::not_found("doctor", id))
        }

        async fn create_doctor(&self, payload: &DoctorPayload) -> ApiResult<Doctor> {
            self.record("POST /doctors");
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let doctor = Doctor {
                id: format!("d{}", state.next_id),
                name: payload.name.clone(),
                specialty: payload.specialty.clone(),
                created_at: Some(Utc::now()),
                updated_at: Some(Utc::now()),
            };
            state.doctors.push(doctor.clone());
            Ok(doctor)
        }

        async fn update_doctor(&self, id: &str, payload: &DoctorPayload) -> ApiResult<Doctor> {
            self.record(format!("PUT /doctors/{id}"));
            let mut state = self.state.lock().unwrap();
            let doctor = state
                .doctors
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| Self::not_found("doctor", id))?;
            doctor.name = payload.name.clone();
            doctor.specialty = payload.specialty.clone();
            Ok(doctor.clone())
        }

        async fn delete_doctor(&self, id: &str) -> ApiResult<DeleteResponse> {
            self.record(format!("DELETE /doctors/{id}"));
            let mut state = self.state.lock().unwrap();
            let before = state.doctors.len();
            state.doctors.retain(|d| d.id != id);
            if state.doctors.len() == before {
                return Err(Self::not_found("doctor", id));
            }
            Ok(DeleteResponse {
                message: "Doctor deleted".to_string(),
            })
        }

        async fn list_appointments(&self) -> ApiResult<Vec<Appointment>> {
            self.record("GET /appointments");
            let state = self.state.lock().unwrap();
            if state.fail_appointments {
                return Err(Self::failure("appointments"));
            }
            Ok(state.appointments.clone())
        }

        async fn get_appointment(&self, id: &str) -> ApiResult<Appointment> {
            self.record(format!("GET /appointments/{id}"));
            let state = self.state.lock().unwrap();
            state
                .appointments
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or_else(|| Self::not_found("appointment", id))
        }

        async fn create_appointment(&self, payload: &AppointmentPayload) -> ApiResult<Appointment> {
            self.record("POST /appointments");
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let appointment = Appointment {
                id: format!("a{}", state.next_id),
                patient_id: Linked::Id(payload.patient_id.clone()),
                doctor_id: Linked::Id(payload.doctor_id.clone()),
                start_at: payload.start_at,
                end_at: payload.end_at,
                notes: payload.notes.clone(),
                created_at: Some(Utc::now()),
                updated_at: Some(Utc::now()),
            };
            state.appointments.push(appointment.clone());
            Ok(appointment)
        }

        async fn update_appointment(
            &self,
            id: &str,
            payload: &AppointmentPayload,
        ) -> ApiResult<Appointment> {
            self.record(format!("PUT /appointments/{id}"));
            let mut state = self.state.lock().unwrap();
            let appointment = state
                .appointments
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| Self::not_found("appointment", id))?;
            appointment.patient_id = Linked::Id(payload.patient_id.clone());
            appointment.doctor_id = Linked::Id(payload.doctor_id.clone());
            appointment.start_at = payload.start_at;
            appointment.end_at = payload.end_at;
            appointment.notes = payload.notes.clone();
            Ok(appointment.clone())
        }

        async fn delete_appointment(&self, id: &str) -> ApiResult<DeleteResponse> {
            self.record(format!("DELETE /appointments/{id}"));
            let mut state = self.state.lock().unwrap();
            let before = state.appointments.len();
            state.appointments.retain(|a| a.id != id);
            if state.appointments.len() == before {
                return Err(Self::not_found("appointment", id));
            }
            Ok(DeleteResponse {
                message: "Appointment deleted".to_string(),
            })
        }
    }
}
