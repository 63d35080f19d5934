//! Patients Page
//!
//! List, search, and a create/edit form for patient records.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::api::ClinicApi;
use crate::models::{Patient, PatientPayload};

use super::{matches_query, Confirm, Message, MessageKind, Mode};

/// Form state for creating or editing a patient
#[derive(Debug, Clone)]
pub struct PatientForm {
    pub name: String,
    pub birth_date: Option<DateTime<Utc>>,
    pub email: String,
    pub phone: String,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            birth_date: Some(Utc::now()),
            email: String::new(),
            phone: String::new(),
        }
    }
}

impl PatientForm {
    fn from_record(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            birth_date: Some(patient.birth_date),
            email: patient.email.clone(),
            phone: patient.phone.clone().unwrap_or_default(),
        }
    }

    /// Wire payload, or `None` while a required field is missing
    fn payload(&self) -> Option<PatientPayload> {
        let birth_date = self.birth_date?;
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return None;
        }
        Some(PatientPayload {
            name: self.name.clone(),
            birth_date,
            email: self.email.clone(),
            phone: if self.phone.trim().is_empty() {
                None
            } else {
                Some(self.phone.clone())
            },
        })
    }
}

/// Controller for the patients page
pub struct PatientsPage {
    api: Arc<dyn ClinicApi>,
    confirm: Arc<dyn Confirm>,
    items: Vec<Patient>,
    query: String,
    loading: bool,
    pub form: PatientForm,
    mode: Mode,
    message: Message,
}

impl PatientsPage {
    pub fn new(api: Arc<dyn ClinicApi>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            confirm,
            items: Vec::new(),
            query: String::new(),
            loading: false,
            form: PatientForm::default(),
            mode: Mode::Create,
            message: Message::info(),
        }
    }

    /// Fetch-on-activation lifecycle entry; the host calls this once per
    /// page activation
    pub async fn load(&mut self) {
        self.refresh().await;
    }

    /// Re-fetch the patient list; on failure the previous list is kept
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.message = Message::info();

        let result = self.api.list_patients().await;
        self.loading = false;

        match result {
            Ok(items) => self.items = items,
            Err(e) => self.message = Message::error(e.user_message()),
        }
    }

    /// All fetched patients
    pub fn items(&self) -> &[Patient] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the search query; filtering is purely in-memory
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Patients matching the current query over name, email, and phone
    pub fn visible(&self) -> Vec<&Patient> {
        self.items
            .iter()
            .filter(|p| {
                matches_query(
                    &self.query,
                    &[&p.name, &p.email, p.phone.as_deref().unwrap_or("")],
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
        self.form = PatientForm::default();
        self.message = Message::info();
    }

    /// Populate the form from an existing record
    pub fn start_edit(&mut self, patient: &Patient) {
        self.mode = Mode::Edit(patient.id.clone());
        self.form = PatientForm::from_record(patient);
        self.message = Message::info();
    }

    /// Whether submit is currently allowed: name, email, and birth date
    /// present, and no call in flight
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
                .update_patient(&id, &payload)
                .await
                .map(|_| "Patient updated."),
            Mode::Create => self
                .api
                .create_patient(&payload)
                .await
                .map(|_| "Patient created."),
        };
        self.loading = false;

        match result {
            Ok(text) => {
                self.mode = Mode::Create;
                self.form = PatientForm::default();
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
        if !self.confirm.confirm("Delete this patient?").await {
            return;
        }

        self.loading = true;
        self.message = Message::info();

        let result = self.api.delete_patient(id).await;
        self.loading = false;

        match result {
            Ok(_) => {
                if self.mode.editing_id() == Some(id) {
                    self.mode = Mode::Create;
                    self.form = PatientForm::default();
                }
                self.refresh().await;
                if self.message.kind != MessageKind::Error {
                    self.message = Message::success("Patient deleted.");
                }
            }
            Err(e) => self.message = Message::error(e.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{FakeBackend, ScriptedConfirm};
    use super::*;

    fn page(backend: Arc<FakeBackend>, confirm: Arc<ScriptedConfirm>) -> PatientsPage {
        PatientsPage::new(backend, confirm)
    }

    #[tokio::test]
    async fn test_create_patient_posts_and_lists_after_refresh() {
        let backend = Arc::new(FakeBackend::new());
        let mut patients = page(backend.clone(), Arc::new(ScriptedConfirm::answering(true)));

        patients.load().await;
        patients.start_create();
        patients.form.name = "Ann Lee".to_string();
        patients.form.email = "ann@x.com".to_string();
        patients.form.birth_date = crate::format::from_date_input_value("1990-05-01");

        assert!(patients.can_submit());
        patients.submit().await;

        assert!(backend.requests().contains(&"POST /patients".to_string()));
        assert_eq!(patients.message().kind, MessageKind::Success);
        assert_eq!(patients.message().text, "Patient created.");
        assert_eq!(patients.mode(), &Mode::Create);

        let names: Vec<_> = patients.items().iter().map(|p| p.name.as_str()).collect();
        let emails: Vec<_> = patients.items().iter().map(|p| p.email.as_str()).collect();
        assert!(names.contains(&"Ann Lee"));
        assert!(emails.contains(&"ann@x.com"));
    }

    #[tokio::test]
    async fn test_submit_is_gated_on_required_fields() {
        let backend = Arc::new(FakeBackend::new());
        let mut patients = page(backend.clone(), Arc::new(ScriptedConfirm::answering(true)));

        patients.start_create();
        patients.form.name = "Ann Lee".to_string();
        // email missing

        assert!(!patients.can_submit());
        patients.submit().await;

        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_edit_submits_update_and_resets_to_create() {
        let backend = Arc::new(FakeBackend::new());
        let seeded = backend.seed_patient("Ann Lee", "ann@x.com");
        let mut patients = page(backend.clone(), Arc::new(ScriptedConfirm::answering(true)));

        patients.load().await;
        patients.start_edit(&seeded);
        assert_eq!(patients.mode(), &Mode::Edit(seeded.id.clone()));

        patients.form.name = "Ann B. Lee".to_string();
        patients.submit().await;

        assert!(backend
            .requests()
            .contains(&format!("PUT /patients/{}", seeded.id)));
        assert_eq!(patients.message().text, "Patient updated.");
        assert_eq!(patients.mode(), &Mode::Create);
        assert_eq!(patients.items()[0].name, "Ann B. Lee");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let backend = Arc::new(FakeBackend::new());
        backend.seed_patient("Ann Lee", "ann@x.com");
        let mut patients = page(backend.clone(), Arc::new(ScriptedConfirm::answering(true)));

        patients.load().await;
        assert_eq!(patients.items().len(), 1);

        backend.fail_patients();
        patients.refresh().await;

        assert_eq!(patients.items().len(), 1);
        assert_eq!(patients.message().kind, MessageKind::Error);
        assert_eq!(patients.message().text, "patients fetch failed");
    }

    #[tokio::test]
    async fn test_declined_confirmation_skips_delete() {
        let backend = Arc::new(FakeBackend::new());
        let seeded = backend.seed_patient("Ann Lee", "ann@x.com");
        let confirm = Arc::new(ScriptedConfirm::answering(false));
        let mut patients = page(backend.clone(), confirm.clone());

        patients.load().await;
        patients.delete(&seeded.id).await;

        assert!(confirm.was_asked());
        assert!(!backend
            .requests()
            .contains(&format!("DELETE /patients/{}", seeded.id)));
        assert_eq!(patients.items().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_matches_name_email_and_phone() {
        let backend = Arc::new(FakeBackend::new());
        backend.seed_patient("Ann Lee", "ann@x.com");
        backend.seed_patient("Bob Reyes", "bob@y.org");
        let mut patients = page(backend, Arc::new(ScriptedConfirm::answering(true)));

        patients.load().await;

        patients.set_query("");
        assert_eq!(patients.visible().len(), patients.items().len());

        patients.set_query("Y.ORG");
        let visible = patients.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Bob Reyes");
    }
}
