use std::path::PathBuf;
use std::sync::Arc;

use api_shared::{CreatePatientReq, PatientRes, SymptomsInput};
use clap::{Parser, Subcommand};
use patients_core::{
    config::database_path_from_env_value, validation::format_loc, CoreConfig, PatientError,
    PatientService,
};

#[derive(Parser)]
#[command(name = "patients")]
#[command(about = "Patients registry CLI")]
struct Cli {
    /// SQLite database file (defaults to PATIENTS_DATABASE_PATH, then patients.db)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the patients table if it does not exist
    Init,
    /// List patients, newest first
    List {
        /// Only show patients whose name contains this text
        #[arg(long)]
        name: Option<String>,
    },
    /// Show one patient
    Show {
        /// Patient id
        id: i64,
    },
    /// Register a new patient
    Create {
        /// Patient name
        name: String,
        /// Age in years
        #[arg(allow_negative_numbers = true)]
        age: i64,
        /// One or more symptoms
        #[arg(required = true)]
        symptoms: Vec<String>,
    },
    /// Print the number of stored patients
    Count,
}

fn print_patient(patient: &PatientRes) {
    println!(
        "ID: {}, Name: {}, Age: {}, Symptoms: {}, Created: {}",
        patient.id,
        patient.name,
        patient.age,
        patient.symptoms.join(" | "),
        patient.created_at.to_rfc3339()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let database_path = cli.database.unwrap_or_else(|| {
        database_path_from_env_value(std::env::var("PATIENTS_DATABASE_PATH").ok())
    });
    let service = PatientService::new(Arc::new(CoreConfig::new(database_path)?));
    service.initialise_database()?;

    match cli.command {
        Some(Commands::Init) => {
            println!(
                "Database ready at {}",
                service.config().database_path().display()
            );
        }
        Some(Commands::List { name }) => {
            let patients = service.list_patients(name.as_deref())?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in &patients {
                    print_patient(patient);
                }
            }
        }
        Some(Commands::Show { id }) => match service.get_patient(id)? {
            Some(patient) => print_patient(&patient),
            None => eprintln!("Patient not found: {}", id),
        },
        Some(Commands::Create {
            name,
            age,
            symptoms,
        }) => {
            let req = CreatePatientReq {
                name,
                age,
                symptoms: SymptomsInput::Many(symptoms),
            };
            match service.create_patient(req) {
                Ok(patient) => print_patient(&patient),
                Err(PatientError::Validation(errors)) => {
                    for item in errors.items() {
                        eprintln!("{}: {}", format_loc(&item.loc), item.msg);
                    }
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Some(Commands::Count) => {
            println!("{}", service.count_patients()?);
        }
        None => {
            println!("No command given. Use --help to see available commands.");
        }
    }

    Ok(())
}
