use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use weatherhub_app::{
    App, AuthOutcome, CoordinateForm, LoginForm, RegisterForm, Route, WeatherView,
};
use weatherhub_auth::{FileStore, KeyValueStore};
use weatherhub_core::{AppError, AuthError, Config};

#[derive(Parser, Debug)]
#[command(name = "weatherhub", about = "WeatherHub command-line client")]
struct Cli {
    /// API base URL (defaults to the configured one)
    #[arg(long, env = "WEATHERHUB_API_URL")]
    base_url: Option<String>,

    /// Session file (defaults to <config dir>/weatherhub/session.json)
    #[arg(long, env = "WEATHERHUB_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Signup {
        email: String,
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Sign in and save the session
    Signin { email: String, password: String },
    /// Sign out and clear the saved session
    Signout,
    /// Current weather at a latitude/longitude
    Weather {
        #[arg(allow_negative_numbers = true)]
        lat: String,
        #[arg(allow_negative_numbers = true)]
        lon: String,
    },
    /// Show the saved session state
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    weatherhub_core::init()?;

    let (config, _) = Config::load_validated()?;
    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone());

    let store: Arc<dyn KeyValueStore> = match cli.session_file {
        Some(path) => Arc::new(FileStore::new(path)),
        None => Arc::new(FileStore::default_location()?),
    };

    let start = match cli.command {
        Command::Signup { .. } => Route::Register,
        Command::Signin { .. } => Route::Login,
        Command::Weather { .. } => Route::Weather,
        Command::Signout | Command::Status => Route::Home,
    };
    let app = App::new(&config, &base_url, store, start)?;

    match cli.command {
        Command::Signup {
            email,
            password,
            confirm,
        } => {
            let outcome = app
                .auth()
                .register(&RegisterForm::new(email, password, confirm))
                .await;
            report_auth(&outcome);
        }
        Command::Signin { email, password } => {
            let outcome = app.auth().login(&LoginForm::new(email, password)).await;
            report_auth(&outcome);
        }
        Command::Signout => {
            let redirect = app.auth().logout().await;
            println!("Signed out. Next: {}", redirect.route.path());
        }
        Command::Weather { lat, lon } => {
            match app.weather().lookup(&CoordinateForm::new(lat, lon)).await {
                WeatherView::Report(report) => {
                    println!(
                        "Weather at {}, {}",
                        report.coordinates.lat, report.coordinates.lon
                    );
                    println!("  Temperature: {}°C", report.temp_c);
                    println!("  Humidity:    {}%", report.humidity);
                    println!("  Condition:   {}", report.description);
                }
                WeatherView::SignInRequired(notice) => {
                    println!("{} (go to {})", notice, Route::Login.path());
                }
                WeatherView::Error(notice) => println!("Error: {}", notice),
            }
        }
        Command::Status => {
            let user = app.session().user()?;
            println!("User:          {}", user.as_deref().unwrap_or("-"));
            println!("Authenticated: {}", app.session().is_authenticated()?);
            println!("Nav action:    {}", app.nav_action()?.label());
        }
    }

    if app.navigator().current() == Route::Login && start != Route::Login {
        println!(
            "{} ({})",
            AppError::from(AuthError::SessionInvalidated).user_message(),
            Route::Login.path()
        );
    }

    Ok(())
}

fn report_auth(outcome: &AuthOutcome) {
    match outcome {
        AuthOutcome::Success { notice, redirect } => {
            println!("{} Next: {}", notice, redirect.route.path());
        }
        AuthOutcome::Failure { notice } => println!("Error: {}", notice),
    }
}
