//! Appointments Page
//!
//! List, search, and a create/edit form for appointments. Refresh also
//! fetches patients and doctors so the host can render selection dropdowns
//! and human-readable names.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::api::ClinicApi;
use crate::models::{Appointment, AppointmentPayload, Doctor, Patient};

use super::{matches_query, Confirm, Message, MessageKind, Mode};

/// Form state for creating or editing an appointment
#[derive(Debug, Clone)]
pub struct AppointmentForm {
    pub patient_id: String,
    pub doctor_id: String,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub notes: String,
}

impl Default for AppointmentForm {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            patient_id: String::new(),
            doctor_id: String::new(),
            start_at: Some(now),
            end_at: Some(now + Duration::minutes(30)),
            notes: String::new(),
        }
    }
}

impl AppointmentForm {
    fn from_record(appointment: &Appointment) -> Self {
        Self {
            patient_id: appointment.patient_id.id().to_string(),
            doctor_id: appointment.doctor_id.id().to_string(),
            start_at: Some(appointment.start_at),
            end_at: Some(appointment.end_at),
            notes: appointment.notes.clone().unwrap_or_default(),
        }
    }

    /// Wire payload, or `None` while a required field is missing or the
    /// window is not strictly positive
    fn payload(&self) -> Option<AppointmentPayload> {
        let start_at = self.start_at?;
        let end_at = self.end_at?;
        if self.patient_id.trim().is_empty() || self.doctor_id.trim().is_empty() {
            return None;
        }
        if end_at <= start_at {
            return None;
        }
        Some(AppointmentPayload {
            patient_id: self.patient_id.clone(),
            doctor_id: self.doctor_id.clone(),
            start_at,
            end_at,
            notes: if self.notes.trim().is_empty() {
                None
            } else {
                Some(self.notes.clone())
            },
        })
    }
}

/// Controller for the appointments page
pub struct AppointmentsPage {
    api: Arc<dyn ClinicApi>,
    confirm: Arc<dyn Confirm>,
    items: Vec<Appointment>,
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    query: String,
    loading: bool,
    pub form: AppointmentForm,
    mode: Mode,
    message: Message,
}

impl AppointmentsPage {
    pub fn new(api: Arc<dyn ClinicApi>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            confirm,
            items: Vec::new(),
            patients: Vec::new(),
            doctors: Vec::new(),
            query: String::new(),
            loading: false,
            form: AppointmentForm::default(),
            mode: Mode::Create,
            message: Message::info(),
        }
    }

    /// Fetch-on-activation lifecycle entry
    pub async fn load(&mut self) {
        self.refresh().await;
    }

    /// Re-fetch appointments, patients, and doctors concurrently.
    ///
    /// Fail-fast: if any of the three fetches fails, none of the lists is
    /// replaced and a single error message is surfaced.
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.message = Message::info();

        let result = tokio::try_join!(
            self.api.list_appointments(),
            self.api.list_patients(),
            self.api.list_doctors(),
        );
        self.loading = false;

        match result {
            Ok((appointments, patients, doctors)) => {
                self.items = appointments;
                self.patients = patients;
                self.doctors = doctors;
            }
            Err(e) => self.message = Message::error(e.user_message()),
        }
    }

    /// All fetched appointments
    pub fn items(&self) -> &[Appointment] {
        &self.items
    }

    /// Patients for the selection dropdown
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Doctors for the selection dropdown
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Appointments matching the current query over patient display name,
    /// doctor display name, and notes
    pub fn visible(&self) -> Vec<&Appointment> {
        self.items
            .iter()
            .filter(|a| {
                matches_query(
                    &self.query,
                    &[
                        a.patient_id.display_name(),
                        a.doctor_id.display_name(),
                        a.notes.as_deref().unwrap_or(""),
                    ],
                )
            })
            .collect()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Reset the form for a new record
    pub fn start_create(&mut self) {
        self.mode = Mode::Create;
        self.form = AppointmentForm::default();
        self.message = Message::info();
    }

    /// Populate the form from an existing record; populated references
    /// collapse back to bare identifiers
    pub fn start_edit(&mut self, appointment: &Appointment) {
        self.mode = Mode::Edit(appointment.id.clone());
        self.form = AppointmentForm::from_record(appointment);
        self.message = Message::info();
    }

    /// Whether submit is currently allowed: patient, doctor, and both
    /// timestamps present, end strictly after start, no call in flight
    pub fn can_submit(&self) -> bool {
        !self.loading && self.form.payload().is_some()
    }

    /// Create or update depending on the current mode, then re-fetch
    pub async fn submit(&mut self) {
        if self.loading {
            return;
        }
        let Some(payload) = self.form.payload() else {
            return;
        };

        self.loading = true;
        self.message = Message::info();

        let result = match self.mode.clone() {
            Mode::Edit(id) => self
                .api
                .update_appointment(&id, &payload)
                .await
                .map(|_| "Appointment updated."),
            Mode::Create => self
                .api
                .create_appointment(&payload)
                .await
                .map(|_| "Appointment created."),
        };
        self.loading = false;

        match result {
            Ok(text) => {
                self.mode = Mode::Create;
                self.form = AppointmentForm::default();
                self.refresh().await;
                if self.message.kind != MessageKind::Error {
                    self.message = Message::success(text);
                }
            }
            Err(e) => self.message = Message::error(e.user_message()),
        }
    }

    /// Delete after interactive confirmation; declining is a no-op.
    /// Deleting the record currently being edited resets to Create.
    pub async fn delete(&mut self, id: &str) {
        if self.loading {
            return;
        }
        if !self.confirm.confirm("Delete this appointment?").await {
            return;
        }

        self.loading = true;
        self.message = Message::info();

        let result = self.api.delete_appointment(id).await;
        self.loading = false;

        match result {
            Ok(_) => {
                if self.mode.editing_id() == Some(id) {
                    self.mode = Mode::Create;
                    self.form = AppointmentForm::default();
                }
                self.refresh().await;
                if self.message.kind != MessageKind::Error {
                    self.message = Message::success("Appointment deleted.");
                }
            }
            Err(e) => self.message = Message::error(e.user_message()),
        }
    }
}
