//! Doctors Page
//!
//! List, search, and a create/edit form for doctor records.

use std::sync::Arc;

use crate::api::ClinicApi;
use crate::models::{Doctor, DoctorPayload};

use super::{matches_query, Confirm, Message, MessageKind, Mode};

/// Form state for creating or editing a doctor
#[derive(Debug, Clone, Default)]
pub struct DoctorForm {
    pub name: String,
    pub specialty: String,
}

impl DoctorForm {
    fn from_record(doctor: &Doctor) -> Self {
        Self {
            name: doctor.name.clone(),
            specialty: doctor.specialty.clone().unwrap_or_default(),
        }
    }

    /// Wire payload, or `None` while the name is missing
    fn payload(&self) -> Option<DoctorPayload> {
        if self.name.trim().is_empty() {
            return None;
        }
        Some(DoctorPayload {
            name: self.name.clone(),
            specialty: if self.specialty.trim().is_empty() {
                None
            } else {
                Some(self.specialty.clone())
            },
        })
    }
}

/// Controller for the doctors page
pub struct DoctorsPage {
    api: Arc<dyn ClinicApi>,
    confirm: Arc<dyn Confirm>,
    items: Vec<Doctor>,
    query: String,
    loading: bool,
    pub form: DoctorForm,
    mode: Mode,
    message: Message,
}

impl DoctorsPage {
    pub fn new(api: Arc<dyn ClinicApi>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            confirm,
            items: Vec::new(),
            query: String::new(),
            loading: false,
            form: DoctorForm::default(),
            mode: Mode::Create,
            message: Message::info(),
        }
    }

    /// Fetch-on-activation lifecycle entry
    pub async fn load(&mut self) {
        self.refresh().await;
    }

    /// Re-fetch the doctor list; on failure the previous list is kept
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.message = Message::info();

        let result = self.api.list_doctors().await;
        self.loading = false;

        match result {
            Ok(items) => self.items = items,
            Err(e) => self.message = Message::error(e.user_message()),
        }
    }

    /// All fetched doctors
    pub fn items(&self) -> &[Doctor] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Doctors matching the current query over name and specialty
    pub fn visible(&self) -> Vec<&Doctor> {
        self.items
            .iter()
            .filter(|d| {
                matches_query(&self.query, &[&d.name, d.specialty.as_deref().unwrap_or("")])
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
        self.form = DoctorForm::default();
        self.message = Message::info();
    }

    /// Populate the form from an existing record
    pub fn start_edit(&mut self, doctor: &Doctor) {
        self.mode = Mode::Edit(doctor.id.clone());
        self.form = DoctorForm::from_record(doctor);
        self.message = Message::info();
    }

    /// Whether submit is currently allowed: name present, no call in flight
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
                .update_doctor(&id, &payload)
                .await
                .map(|_| "Doctor updated."),
            Mode::Create => self
                .api
                .create_doctor(&payload)
                .await
                .map(|_| "Doctor created."),
        };
        self.loading = false;

        match result {
            Ok(text) => {
                self.mode = Mode::Create;
                self.form = DoctorForm::default();
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
        if !self.confirm.confirm("Delete this doctor?").await {
            return;
        }

        self.loading = true;
        self.message = Message::info();

        let result = self.api.delete_doctor(id).await;
        self.loading = false;

        match result {
            Ok(_) => {
                if self.mode.editing_id() == Some(id) {
                    self.mode = Mode::Create;
                    self.form = DoctorForm::default();
                }
                self.refresh().await;
                if self.message.kind != MessageKind::Error {
                    self.message = Message::success("Doctor deleted.");
                }
            }
            Err(e) => self.message = Message::error(e.user_message()),
        }
    }
}
