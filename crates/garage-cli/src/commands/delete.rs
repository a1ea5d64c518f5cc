//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use garage_client::Garage;
use garage_core::DocId;

use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Vehicle id
    pub id: String,
}

pub async fn run(args: DeleteArgs, mut garage: Garage) -> Result<()> {
    let id = DocId::new(&args.id).context("Invalid vehicle id")?;

    garage.load().await.context("Failed to load vehicles")?;
    garage
        .delete(&id)
        .await
        .context("Failed to delete vehicle")?;

    output::success("Car deleted!");

    Ok(())
}
