//! Subcommand implementations.

mod add;
mod delete;
mod edit;
mod list;
mod show;
mod vehicle_args;

use anyhow::{Context, Result};
use clap::Subcommand;

use garage_client::{ApiClient, Garage};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every vehicle
    List(list::ListArgs),

    /// Show one vehicle in full
    Show(show::ShowArgs),

    /// Add a vehicle
    Add(add::AddArgs),

    /// Edit a vehicle
    Edit(edit::EditArgs),

    /// Delete a vehicle
    Delete(delete::DeleteArgs),
}

pub async fn handle(cmd: Commands, api: &str) -> Result<()> {
    let client = ApiClient::new(api).context("Invalid API URL")?;
    let garage = Garage::new(client);

    match cmd {
        Commands::List(args) => list::run(args, garage).await,
        Commands::Show(args) => show::run(args, garage).await,
        Commands::Add(args) => add::run(args, garage).await,
        Commands::Edit(args) => edit::run(args, garage).await,
        Commands::Delete(args) => delete::run(args, garage).await,
    }
}
