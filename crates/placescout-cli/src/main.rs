mod auth;
mod key;
mod lookup;
mod search;
mod table;

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use placescout_auth::{ProfileUpdate, SignInData, SignUpData};
use placescout_core::{FileCredentialStore, KeyedFileStore};
use tracing_subscriber::EnvFilter;

use crate::search::SearchForm;

#[derive(Debug, Parser)]
#[command(name = "placescout")]
#[command(about = "Search a business directory by type and location, and export the results")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for businesses and print (or export) the results
    Search(SearchArgs),
    /// List the states or provinces of a country
    States { country: String },
    /// List the cities of a state
    Cities { country: String, state: String },
    /// Show the full record for one place
    Details { place_id: String },
    /// Manage the saved Google Places API key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Account commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Print the bundled choice lists
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Business type, e.g. "Restaurant"
    #[arg(long = "type", default_value = "")]
    business_type: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    zip: String,
    /// Free-form query such as "Coffee Shop in San Jose, CA"; overrides the fields
    #[arg(long, default_value = "")]
    query: String,
    /// Only show rows whose name, address or phone contains this text
    #[arg(long)]
    filter: Option<String>,
    /// Write the shown rows as CSV into this directory
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print the resolved query without calling the provider
    #[arg(long)]
    dry_run: bool,
}

impl SearchArgs {
    fn form(&self) -> SearchForm {
        SearchForm {
            business_type: self.business_type.clone(),
            country: self.country.clone(),
            state: self.state.clone(),
            city: self.city.clone(),
            zip: self.zip.clone(),
            custom_query: self.query.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum KeyCommands {
    Set { key: String },
    /// Print the saved key with all but the last four characters masked
    Show,
    Clear,
}

#[derive(Debug, Subcommand)]
enum AuthCommands {
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PLACESCOUT_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PLACESCOUT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    SignOut,
    /// Update the first and last name on the account
    Profile {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    Whoami,
}

#[derive(Debug, Subcommand)]
enum CatalogCommands {
    Types,
    Countries,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = placescout_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let store = KeyedFileStore::new(&config.store_path);

    match cli.command {
        Some(Commands::Search(args)) => {
            search::run_search(
                &config,
                args.form(),
                args.filter.as_deref(),
                args.export.as_deref(),
                args.dry_run,
            )
            .await?;
        }
        Some(Commands::States { country }) => lookup::run_states(&config, &country).await?,
        Some(Commands::Cities { country, state }) => {
            lookup::run_cities(&config, &country, &state).await?;
        }
        Some(Commands::Details { place_id }) => {
            let credentials = FileCredentialStore::new(store);
            lookup::run_details(&config, &credentials, &place_id).await?;
        }
        Some(Commands::Key { command }) => {
            let credentials = FileCredentialStore::new(store);
            match command {
                KeyCommands::Set { key } => key::run_key_set(&credentials, &key)?,
                KeyCommands::Show => key::run_key_show(&credentials)?,
                KeyCommands::Clear => key::run_key_clear(&credentials)?,
            }
        }
        Some(Commands::Auth { command }) => {
            let ctx = auth::AuthContext::open(&config, store).await?;
            match command {
                AuthCommands::SignUp {
                    email,
                    password,
                    first_name,
                    last_name,
                } => {
                    ctx.sign_up(&SignUpData {
                        email,
                        password,
                        first_name,
                        last_name,
                    })
                    .await?;
                }
                AuthCommands::SignIn { email, password } => {
                    ctx.sign_in(&SignInData { email, password }).await?;
                }
                AuthCommands::SignOut => ctx.sign_out().await?,
                AuthCommands::Profile {
                    first_name,
                    last_name,
                } => {
                    ctx.update_profile(&ProfileUpdate {
                        first_name,
                        last_name,
                    })
                    .await?;
                }
                AuthCommands::Whoami => ctx.whoami(),
            }
        }
        Some(Commands::Catalog { command }) => match command {
            CatalogCommands::Types => lookup::run_catalog_types(&config)?,
            CatalogCommands::Countries => lookup::run_catalog_countries(&config)?,
        },
        None => Cli::command().print_help()?,
    }

    Ok(())
}
