//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;

use garage_client::Garage;

use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the raw documents as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, mut garage: Garage) -> Result<()> {
    garage.load().await.context("Failed to load vehicles")?;

    if args.json {
        let docs: Vec<_> = garage.vehicles().collect();
        return output::json_pretty(&docs);
    }

    if garage.is_empty() {
        println!("No Car!!!");
        return Ok(());
    }

    for doc in garage.vehicles() {
        output::card(doc);
    }

    Ok(())
}
