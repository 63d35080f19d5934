//! Clinic Data Model
//!
//! Wire types for the three backend resources:
//! - **Patient**: demographic record (name, birth date, contact details)
//! - **Doctor**: practitioner record (name, specialty)
//! - **Appointment**: a patient/doctor booking with a start/end window
//!
//! Field names follow the backend's JSON (camelCase, Mongo-style `_id`);
//! timestamps are ISO-8601 strings on the wire and `DateTime<Utc>` here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A patient as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub birth_date: DateTime<Utc>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A doctor as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An appointment as returned by the backend
///
/// The backend populates `patientId`/`doctorId` with embedded records on
/// GET responses, so both fields are [`Linked`] rather than plain strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    pub patient_id: Linked<Patient>,
    pub doctor_id: Linked<Doctor>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A reference that the backend may return either as a bare identifier
/// or as a populated embedded record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linked<T> {
    Embedded(T),
    Id(String),
}

/// Common view over records that appear as populated references
pub trait Record {
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
}

impl Record for Patient {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for Doctor {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl<T: Record> Linked<T> {
    /// The record's identifier, regardless of variant
    pub fn id(&self) -> &str {
        match self {
            Linked::Embedded(record) => record.id(),
            Linked::Id(id) => id,
        }
    }

    /// Human-readable name; bare references fall back to the identifier
    pub fn display_name(&self) -> &str {
        match self {
            Linked::Embedded(record) => record.display_name(),
            Linked::Id(id) => id,
        }
    }
}

// ============================================
// Write payloads
// ============================================

/// Create/update body for a patient
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPayload {
    pub name: String,
    pub birth_date: DateTime<Utc>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Create/update body for a doctor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

/// Create/update body for an appointment
///
/// Write payloads always carry bare identifier strings; only GET responses
/// use the populated shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub patient_id: String,
    pub doctor_id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of a successful DELETE
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
