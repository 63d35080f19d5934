//! Dashboard
//!
//! Read-only aggregate counts across the three resources.

use std::sync::Arc;

use serde::Serialize;

use crate::api::ClinicApi;

/// Counts shown on the dashboard
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DashboardCounts {
    pub patients: usize,
    pub doctors: usize,
    pub appointments: usize,
}

/// Controller for the dashboard page
pub struct Dashboard {
    api: Arc<dyn ClinicApi>,
    counts: Option<DashboardCounts>,
    error: Option<String>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn ClinicApi>) -> Self {
        Self {
            api,
            counts: None,
            error: None,
        }
    }

    /// Fetch all three collections concurrently and store their counts.
    ///
    /// Fail-fast: a single failure leaves the counts unset and surfaces one
    /// error message; partial counts are never shown.
    pub async fn load(&mut self) {
        self.error = None;

        let result = tokio::try_join!(
            self.api.list_patients(),
            self.api.list_doctors(),
            self.api.list_appointments(),
        );

        match result {
            Ok((patients, doctors, appointments)) => {
                self.counts = Some(DashboardCounts {
                    patients: patients.len(),
                    doctors: doctors.len(),
                    appointments: appointments.len(),
                });
            }
            Err(e) => {
                self.counts = None;
                self.error = Some(e.user_message());
            }
        }
    }

    /// Counts from the last successful load, if any
    pub fn counts(&self) -> Option<DashboardCounts> {
        self.counts
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
