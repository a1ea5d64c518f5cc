//! Show command implementation.

use anyhow::{Context, Result};
use clap::Args;

use garage_client::Garage;
use garage_core::DocId;

use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Vehicle id
    pub id: String,

    /// Print the raw document as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ShowArgs, garage: Garage) -> Result<()> {
    let id = DocId::new(&args.id).context("Invalid vehicle id")?;

    let doc = garage
        .api()
        .read_one(&id)
        .await
        .context("Failed to fetch vehicle")?;

    if args.json {
        output::json_pretty(&doc)?;
    } else {
        output::detail(&doc);
    }

    Ok(())
}
