//! # Mediboard
//!
//! Clinic Management Console - a Rust client for the clinic REST backend.
//! Staff list, create, edit, and delete patients, doctors, and appointments,
//! and see aggregate counts on a dashboard.
//!
//! ## Architecture
//!
//! - **Page controllers** own list, search, form, and mode state for one
//!   resource each; every mutation is followed by an authoritative re-fetch
//! - **The facade** maps each resource to typed list/get/create/update/delete
//!   calls; it is a trait so tests can swap in an in-memory backend
//! - **The HTTP wrapper** configures the base URL and collapses every
//!   failure into a single display string
//!
//! ## Modules
//!
//! - [`api`]: HTTP client wrapper and typed resource facade
//! - [`models`]: wire types for the three resources
//! - [`format`]: conversions between UTC timestamps and form input values
//! - [`pages`]: per-resource page controllers and the dashboard
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mediboard::api::ClinicClient;
//! use mediboard::pages::Dashboard;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = Arc::new(ClinicClient::new("http://localhost:3000/api"));
//!
//!     let mut dashboard = Dashboard::new(api);
//!     dashboard.load().await;
//!
//!     match dashboard.counts() {
//!         Some(counts) => println!(
//!             "{} patients, {} doctors, {} appointments",
//!             counts.patients, counts.doctors, counts.appointments
//!         ),
//!         None => eprintln!("{}", dashboard.error().unwrap_or("Unknown error")),
//!     }
//! }
//! ```

pub mod api;
pub mod config;
pub mod format;
pub mod models;
pub mod pages;

// Re-export top-level types for convenience
pub use api::{ApiClient, ApiError, ApiResult, ClinicApi, ClinicClient, DEFAULT_BASE_URL};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};

pub use models::{
    Appointment, AppointmentPayload, DeleteResponse, Doctor, DoctorPayload, Linked, Patient,
    PatientPayload, Record,
};

pub use pages::{
    AppointmentForm, AppointmentsPage, AutoConfirm, Confirm, Dashboard, DashboardCounts,
    DoctorForm, DoctorsPage, Message, MessageKind, Mode, PatientForm, PatientsPage,
};
