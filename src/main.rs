//! Mediboard CLI
//!
//! Command-line console for the clinic backend:
//! - Dashboard counts
//! - Patients, doctors, appointments: list, show, create, update, delete

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediboard::api::{ClinicApi, ClinicClient};
use mediboard::config::{generate_default_config, Config};
use mediboard::format::{
    format_date, format_datetime, from_date_input_value, from_datetime_local_value,
};
use mediboard::pages::{
    AppointmentsPage, AutoConfirm, Confirm, Dashboard, DoctorsPage, Message, MessageKind,
    PatientsPage,
};

#[derive(Parser)]
#[command(name = "mediboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clinic management console")]
#[command(long_about = "Mediboard is a console for a clinic management backend.\nList, create, edit, and delete patients, doctors, and appointments.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend API base URL (overrides config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    format: String,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show aggregate counts for all three resources
    Dashboard,

    /// Manage patient records
    Patients {
        #[command(subcommand)]
        command: PatientCommands,
    },

    /// Manage doctor records
    Doctors {
        #[command(subcommand)]
        command: DoctorCommands,
    },

    /// Manage appointments
    Appointments {
        #[command(subcommand)]
        command: AppointmentCommands,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PatientCommands {
    /// List patients
    List {
        /// Filter by name/email/phone substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one patient
    Show { id: String },
    /// Create a patient
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Birth date (YYYY-MM-DD, local)
        #[arg(long)]
        birth_date: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Update a patient
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Birth date (YYYY-MM-DD, local)
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a patient (asks for confirmation)
    Delete { id: String },
}

#[derive(Subcommand)]
enum DoctorCommands {
    /// List doctors
    List {
        /// Filter by name/specialty substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one doctor
    Show { id: String },
    /// Create a doctor
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Update a doctor
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Delete a doctor (asks for confirmation)
    Delete { id: String },
}

#[derive(Subcommand)]
enum AppointmentCommands {
    /// List appointments
    List {
        /// Filter by patient/doctor/notes substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one appointment
    Show { id: String },
    /// Create an appointment
    Create {
        /// Patient id
        #[arg(long)]
        patient: String,
        /// Doctor id
        #[arg(long)]
        doctor: String,
        /// Start (YYYY-MM-DDTHH:MM, local)
        #[arg(long)]
        start: String,
        /// End (YYYY-MM-DDTHH:MM, local)
        #[arg(long)]
        end: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update an appointment
    Update {
        id: String,
        /// Patient id
        #[arg(long)]
        patient: Option<String>,
        /// Doctor id
        #[arg(long)]
        doctor: Option<String>,
        /// Start (YYYY-MM-DDTHH:MM, local)
        #[arg(long)]
        start: Option<String>,
        /// End (YYYY-MM-DDTHH:MM, local)
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an appointment (asks for confirmation)
    Delete { id: String },
}

/// Confirmation that prompts on the terminal
struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("failed to write config to {path:?}"))?;
                println!("Wrote config to {path:?}");
            }
            None => print!("{content}"),
        }
        return Ok(());
    }

    let base_url = cli.api_url.clone().unwrap_or(config.api.base_url);
    tracing::debug!(%base_url, "using clinic backend");

    let api: Arc<dyn ClinicApi> = Arc::new(ClinicClient::new(base_url));
    let confirm: Arc<dyn Confirm> = if cli.yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(StdinConfirm)
    };

    match cli.command {
        Commands::Dashboard => run_dashboard(api, &cli.format).await,
        Commands::Patients { command } => run_patients(command, api, confirm, &cli.format).await,
        Commands::Doctors { command } => run_doctors(command, api, confirm, &cli.format).await,
        Commands::Appointments { command } => {
            run_appointments(command, api, confirm, &cli.format).await
        }
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("mediboard={}", config.logging.level)),
    );

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Print the page's inline message and exit non-zero on error
fn finish(message: &Message) {
    match message.kind {
        MessageKind::Error => {
            eprintln!("{}", message.text);
            std::process::exit(1);
        }
        _ => {
            if !message.is_empty() {
                println!("{}", message.text);
            }
        }
    }
}

fn invalid_form(requirements: &str) -> ! {
    eprintln!("Required: {requirements}");
    std::process::exit(1);
}

async fn run_dashboard(api: Arc<dyn ClinicApi>, format: &str) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(api);
    dashboard.load().await;

    match dashboard.counts() {
        Some(counts) => {
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                println!("Patients:     {}", counts.patients);
                println!("Doctors:      {}", counts.doctors);
                println!("Appointments: {}", counts.appointments);
            }
        }
        None => {
            eprintln!("{}", dashboard.error().unwrap_or("Unknown error"));
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run_patients(
    command: PatientCommands,
    api: Arc<dyn ClinicApi>,
    confirm: Arc<dyn Confirm>,
    format: &str,
) -> anyhow::Result<()> {
    match command {
        PatientCommands::List { search } => {
            let mut page = PatientsPage::new(api, confirm);
            page.load().await;
            finish(page.message());

            if let Some(query) = search {
                page.set_query(query);
            }

            let visible = page.visible();
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else if visible.is_empty() {
                println!("No patients found.");
            } else {
                println!(
                    "{:<24} {:<28} {:<14} {}",
                    "Name", "Email", "Birth date", "Phone"
                );
                println!("{}", "-".repeat(76));
                for patient in &visible {
                    println!(
                        "{:<24} {:<28} {:<14} {}",
                        patient.name,
                        patient.email,
                        format_date(Some(patient.birth_date)),
                        patient.phone.as_deref().unwrap_or("-")
                    );
                }
                println!();
                println!("{} shown", visible.len());
            }
        }

        PatientCommands::Show { id } => match api.get_patient(&id).await {
            Ok(patient) => {
                if format == "json" {
                    println!("{}", serde_json::to_string_pretty(&patient)?);
                } else {
                    println!("Id:         {}", patient.id);
                    println!("Name:       {}", patient.name);
                    println!("Email:      {}", patient.email);
                    println!("Birth date: {}", format_date(Some(patient.birth_date)));
                    println!("Phone:      {}", patient.phone.as_deref().unwrap_or("-"));
                }
            }
            Err(e) => {
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        },

        PatientCommands::Create {
            name,
            email,
            birth_date,
            phone,
        } => {
            let mut page = PatientsPage::new(api, confirm);
            page.start_create();
            page.form.name = name;
            page.form.email = email;
            page.form.birth_date = from_date_input_value(&birth_date);
            page.form.phone = phone.unwrap_or_default();

            if !page.can_submit() {
                invalid_form("name, email, birth date (YYYY-MM-DD)");
            }
            page.submit().await;
            finish(page.message());
        }

        PatientCommands::Update {
            id,
            name,
            email,
            birth_date,
            phone,
        } => {
            let patient = match api.get_patient(&id).await {
                Ok(patient) => patient,
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            };

            let mut page = PatientsPage::new(api, confirm);
            page.start_edit(&patient);
            if let Some(name) = name {
                page.form.name = name;
            }
            if let Some(email) = email {
                page.form.email = email;
            }
            if let Some(birth_date) = birth_date {
                page.form.birth_date = from_date_input_value(&birth_date);
            }
            if let Some(phone) = phone {
                page.form.phone = phone;
            }

            if !page.can_submit() {
                invalid_form("name, email, birth date (YYYY-MM-DD)");
            }
            page.submit().await;
            finish(page.message());
        }

        PatientCommands::Delete { id } => {
            let mut page = PatientsPage::new(api, confirm);
            page.delete(&id).await;
            finish(page.message());
        }
    }

    Ok(())
}

async fn run_doctors(
    command: DoctorCommands,
    api: Arc<dyn ClinicApi>,
    confirm: Arc<dyn Confirm>,
    format: &str,
) -> anyhow::Result<()> {
    match command {
        DoctorCommands::List { search } => {
            let mut page = DoctorsPage::new(api, confirm);
            page.load().await;
            finish(page.message());

            if let Some(query) = search {
                page.set_query(query);
            }

            let visible = page.visible();
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else if visible.is_empty() {
                println!("No doctors found.");
            } else {
                println!("{:<28} {}", "Name", "Specialty");
                println!("{}", "-".repeat(48));
                for doctor in &visible {
                    println!(
                        "{:<28} {}",
                        doctor.name,
                        doctor.specialty.as_deref().unwrap_or("-")
                    );
                }
                println!();
                println!("{} shown", visible.len());
            }
        }

        DoctorCommands::Show { id } => match api.get_doctor(&id).await {
            Ok(doctor) => {
                if format == "json" {
                    println!("{}", serde_json::to_string_pretty(&doctor)?);
                } else {
                    println!("Id:        {}", doctor.id);
                    println!("Name:      {}", doctor.name);
                    println!("Specialty: {}", doctor.specialty.as_deref().unwrap_or("-"));
                }
            }
            Err(e) => {
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        },

        DoctorCommands::Create { name, specialty } => {
            let mut page = DoctorsPage::new(api, confirm);
            page.start_create();
            page.form.name = name;
            page.form.specialty = specialty.unwrap_or_default();

            if !page.can_submit() {
                invalid_form("name");
            }
            page.submit().await;
            finish(page.message());
        }

        DoctorCommands::Update {
            id,
            name,
            specialty,
        } => {
            let doctor = match api.get_doctor(&id).await {
                Ok(doctor) => doctor,
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            };

            let mut page = DoctorsPage::new(api, confirm);
            page.start_edit(&doctor);
            if let Some(name) = name {
                page.form.name = name;
            }
            if let Some(specialty) = specialty {
                page.form.specialty = specialty;
            }

            if !page.can_submit() {
                invalid_form("name");
            }
            page.submit().await;
            finish(page.message());
        }

        DoctorCommands::Delete { id } => {
            let mut page = DoctorsPage::new(api, confirm);
            page.delete(&id).await;
            finish(page.message());
        }
    }

    Ok(())
}

async fn run_appointments(
    command: AppointmentCommands,
    api: Arc<dyn ClinicApi>,
    confirm: Arc<dyn Confirm>,
    format: &str,
) -> anyhow::Result<()> {
    match command {
        AppointmentCommands::List { search } => {
            let mut page = AppointmentsPage::new(api, confirm);
            page.load().await;
            finish(page.message());

            if let Some(query) = search {
                page.set_query(query);
            }

            let visible = page.visible();
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else if visible.is_empty() {
                println!("No appointments found.");
            } else {
                println!(
                    "{:<22} {:<22} {:<20} {:<20} {}",
                    "Patient", "Doctor", "Start", "End", "Notes"
                );
                println!("{}", "-".repeat(96));
                for appointment in &visible {
                    println!(
                        "{:<22} {:<22} {:<20} {:<20} {}",
                        appointment.patient_id.display_name(),
                        appointment.doctor_id.display_name(),
                        format_datetime(Some(appointment.start_at)),
                        format_datetime(Some(appointment.end_at)),
                        appointment.notes.as_deref().unwrap_or("-")
                    );
                }
                println!();
                println!("{} shown", visible.len());
            }
        }

        AppointmentCommands::Show { id } => match api.get_appointment(&id).await {
            Ok(appointment) => {
                if format == "json" {
                    println!("{}", serde_json::to_string_pretty(&appointment)?);
                } else {
                    println!("Id:      {}", appointment.id);
                    println!("Patient: {}", appointment.patient_id.display_name());
                    println!("Doctor:  {}", appointment.doctor_id.display_name());
                    println!("Start:   {}", format_datetime(Some(appointment.start_at)));
                    println!("End:     {}", format_datetime(Some(appointment.end_at)));
                    println!("Notes:   {}", appointment.notes.as_deref().unwrap_or("-"));
                }
            }
            Err(e) => {
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        },

        AppointmentCommands::Create {
            patient,
            doctor,
            start,
            end,
            notes,
        } => {
            let mut page = AppointmentsPage::new(api, confirm);
            page.start_create();
            page.form.patient_id = patient;
            page.form.doctor_id = doctor;
            page.form.start_at = from_datetime_local_value(&start);
            page.form.end_at = from_datetime_local_value(&end);
            page.form.notes = notes.unwrap_or_default();

            if !page.can_submit() {
                invalid_form("patient, doctor, start/end as YYYY-MM-DDTHH:MM (end must be after start)");
            }
            page.submit().await;
            finish(page.message());
        }

        AppointmentCommands::Update {
            id,
            patient,
            doctor,
            start,
            end,
            notes,
        } => {
            let appointment = match api.get_appointment(&id).await {
                Ok(appointment) => appointment,
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            };

            let mut page = AppointmentsPage::new(api, confirm);
            page.start_edit(&appointment);
            if let Some(patient) = patient {
                page.form.patient_id = patient;
            }
            if let Some(doctor) = doctor {
                page.form.doctor_id = doctor;
            }
            if let Some(start) = start {
                page.form.start_at = from_datetime_local_value(&start);
            }
            if let Some(end) = end {
                page.form.end_at = from_datetime_local_value(&end);
            }
            if let Some(notes) = notes {
                page.form.notes = notes;
            }

            if !page.can_submit() {
                invalid_form("patient, doctor, start/end as YYYY-MM-DDTHH:MM (end must be after start)");
            }
            page.submit().await;
            finish(page.message());
        }

        AppointmentCommands::Delete { id } => {
            let mut page = AppointmentsPage::new(api, confirm);
            page.delete(&id).await;
            finish(page.message());
        }
    }

    Ok(())
}
