use std::env;
use std::io;
use std::process::ExitCode;

use popcorn_park::BookingReconciler;
use popcorn_park::api::HttpApi;
use popcorn_park::catalog::{self, Catalog, CatalogError};
use popcorn_park::config::{Config, ConfigError};
use popcorn_park::identity::{PresetProfile, ProviderProfile, Session, sign_in_with_google};
use popcorn_park::store::{FileStore, StoreError};
use thiserror::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

const USAGE: &str = "usage: popcorn-park <command>

commands:
  movies [query]                list movies whose name contains query
  login <name> <email> [photo]  sign in with a google profile
  logout                        end the session
  review                        show the pending booking and its cost
  pay [vehicle-number]          confirm payment for the pending booking";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

enum Command {
    Movies { query: String },
    Login { profile: ProviderProfile },
    Logout,
    Review,
    Pay { vehicle_number: Option<String> },
}

impl Command {
    fn parse(args: &[String]) -> Option<Self> {
        let (name, rest) = args.split_first()?;
        let command = match (name.as_str(), rest) {
            ("movies", []) => Command::Movies {
                query: String::new(),
            },
            ("movies", [query]) => Command::Movies {
                query: query.clone(),
            },
            ("login", [name, email, photo @ ..]) if photo.len() <= 1 => Command::Login {
                profile: ProviderProfile {
                    display_name: Some(name.clone()),
                    email: Some(email.clone()),
                    photo_url: photo.first().cloned(),
                },
            },
            ("logout", []) => Command::Logout,
            ("review", []) => Command::Review,
            ("pay", []) => Command::Pay {
                vehicle_number: None,
            },
            ("pay", [vehicle_number]) => Command::Pay {
                vehicle_number: Some(vehicle_number.clone()),
            },
            _ => return None,
        };
        Some(command)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = Command::parse(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(command).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<ExitCode, CliError> {
    let config = Config::from_env()?;
    let store = FileStore::new(&config.store_dir);
    let api = HttpApi::new(&config.api_url);
    let session = Session::new(store.clone());

    match command {
        Command::Movies { query } => {
            let movies = Catalog::fetch(&api).await?;
            catalog::write_movies(io::stdout().lock(), movies.search(&query))?;
        }
        Command::Login { profile } => {
            match sign_in_with_google(&PresetProfile(profile), &api, &session).await {
                Ok(_) => {
                    if let Some(user) = session.current()? {
                        println!("Signed in as {}", user.email);
                    }
                }
                Err(e) => {
                    println!("{}", e.notice());
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Logout => {
            session.sign_out()?;
            println!("Signed out");
        }
        Command::Review => {
            if let Some(identity) = session.identity()? {
                println!("Welcome, {}", identity.email);
            }
            let view = BookingReconciler::open(api, store)?;
            match view.summary() {
                Some(summary) => println!("{summary}"),
                None => println!("Booking data is missing!"),
            }
        }
        Command::Pay { vehicle_number } => {
            let identity = session.identity()?;
            let view = BookingReconciler::open(api, store)?.with_timeout(config.submit_timeout);
            if let Some(vehicle_number) = vehicle_number {
                view.set_vehicle_number(vehicle_number);
            }

            match view.submit(identity.as_ref()).await {
                Ok(confirmation) => println!("{}", confirmation.notice()),
                Err(e) => {
                    if let Some(notice) = e.notice() {
                        println!("{notice}");
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
