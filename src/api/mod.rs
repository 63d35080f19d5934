//! Clinic Backend API
//!
//! Client layer for the clinic REST backend.
//!
//! # Endpoints
//!
//! ## Patients
//! - `GET /patients` / `POST /patients`
//! - `GET /patients/{id}` / `PUT /patients/{id}` / `DELETE /patients/{id}`
//!
//! ## Doctors
//! - `GET /doctors` / `POST /doctors`
//! - `GET /doctors/{id}` / `PUT /doctors/{id}` / `DELETE /doctors/{id}`
//!
//! ## Appointments
//! - `GET /appointments` / `POST /appointments`
//! - `GET /appointments/{id}` / `PUT /appointments/{id}` / `DELETE /appointments/{id}`
//!
//! Two pieces:
//! - [`client`](self): the base-URL-configured HTTP wrapper and the error
//!   taxonomy that turns every failure into a display string
//! - [`ClinicApi`]/[`ClinicClient`]: the typed facade over the resources

mod client;
mod clinic;

pub use client::{ApiClient, ApiError, DEFAULT_BASE_URL};
pub use clinic::{ApiResult, ClinicApi, ClinicClient};
