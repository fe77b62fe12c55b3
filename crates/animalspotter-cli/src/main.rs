//! AnimalSpotter - command-line client for the animal sighting service.
//!
//! Usage:
//!   animalspotter signup          register a new account
//!   animalspotter names           list all animal names
//!   animalspotter animal <name>   show one animal and its picture size
//!
//! Credentials are read from `ANIMALSPOTTER_USERNAME` / `ANIMALSPOTTER_PASSWORD`
//! or prompted for. Sessions are not persisted, so every command signs in.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use animalspotter_core::viewmodel::{
    AnimalDetailViewModel, AnimalsViewModel, GetAnimalNamesResult, GetAnimalResult, LoginResult,
    LoginViewModel,
};
use animalspotter_core::{ApiClient, Config, Credentials, Session};

const USERNAME_ENV: &str = "ANIMALSPOTTER_USERNAME";
const PASSWORD_ENV: &str = "ANIMALSPOTTER_PASSWORD";

const USAGE: &str = "usage: animalspotter <signup | names | animal <name>>";

enum Command {
    SignUp,
    Names,
    Animal(String),
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        match args {
            [cmd] if cmd == "signup" => Ok(Command::SignUp),
            [cmd] if cmd == "names" => Ok(Command::Names),
            [cmd, rest @ ..] if cmd == "animal" && !rest.is_empty() => {
                Ok(Command::Animal(rest.join(" ")))
            }
            _ => bail!(USAGE),
        }
    }
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };
    info!(base_url = %config.base_url, "AnimalSpotter starting");

    let api = ApiClient::new(&config.base_url, Session::new())?;
    let credentials = read_credentials(&config)?;
    let mut login = LoginViewModel::new(api.clone());

    if let Command::SignUp = command {
        login.sign_up(credentials).await;
        return report_login(login.next_result().await);
    }

    login.sign_in(credentials.clone()).await;
    report_login(login.next_result().await)?;

    config.last_username = Some(credentials.username);
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    match command {
        Command::Names => show_names(AnimalsViewModel::new(api)).await,
        Command::Animal(name) => show_animal(AnimalDetailViewModel::new(api), &name).await,
        Command::SignUp => Ok(()),
    }
}

fn report_login(result: Option<LoginResult>) -> Result<()> {
    let result = result.context("Login request produced no result")?;
    if !result.is_success() {
        bail!(result.message());
    }
    eprintln!("{}", result.message());
    Ok(())
}

async fn show_names(mut animals: AnimalsViewModel) -> Result<()> {
    animals.get_animal_names().await;

    match animals.next_result().await {
        Some(GetAnimalNamesResult::Success) => {
            for name in animals.animal_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Some(GetAnimalNamesResult::Failure(message)) => bail!(message),
        None => bail!("Animal names request produced no result"),
    }
}

/// Print the record as soon as it arrives, then the picture outcome
async fn show_animal(mut detail: AnimalDetailViewModel, name: &str) -> Result<()> {
    detail.get_animal(name).await;

    while let Some(result) = detail.next_result().await {
        match result {
            GetAnimalResult::SuccessfulWithAnimal(animal) => {
                println!("{}", animal.name);
                println!("  Seen:        {}", animal.time_seen_display());
                println!("  Location:    {}", animal.coordinates_display());
                println!("  Description: {}", animal.description);
            }
            GetAnimalResult::SuccessfulWithImage(image) => {
                println!("  Picture:     {}x{}", image.width(), image.height());
                return Ok(());
            }
            GetAnimalResult::Failure(message) => bail!(message),
        }
    }
    Ok(())
}

fn read_credentials(config: &Config) -> Result<Credentials> {
    let username = match std::env::var(USERNAME_ENV) {
        Ok(u) if !u.is_empty() => u,
        _ => prompt_username(config.last_username.as_deref())?,
    };

    let password = match std::env::var(PASSWORD_ENV) {
        Ok(p) if !p.is_empty() => p,
        _ => rpassword::prompt_password("Password: ")?,
    };

    Ok(Credentials::new(username, password))
}

fn prompt_username(last_username: Option<&str>) -> Result<String> {
    match last_username {
        Some(last) => print!("Username [{}]: ", last),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    match (input.is_empty(), last_username) {
        (true, Some(last)) => Ok(last.to_string()),
        _ => Ok(input.to_string()),
    }
}
