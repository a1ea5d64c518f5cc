//! Edit command implementation.

use anyhow::{Context, Result};
use clap::Args;

use garage_client::Garage;
use garage_core::DocId;

use super::vehicle_args::VehicleArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Vehicle id
    pub id: String,

    #[command(flatten)]
    pub vehicle: VehicleArgs,
}

pub async fn run(args: EditArgs, mut garage: Garage) -> Result<()> {
    let id = DocId::new(&args.id).context("Invalid vehicle id")?;

    garage.load().await.context("Failed to load vehicles")?;
    let mut form = garage
        .begin_edit(&id)
        .context("Failed to start edit")?;

    args.vehicle.apply(&mut form);
    form.validate()?;

    let doc = garage
        .submit_edit(&form)
        .await
        .context("Failed to update vehicle")?;

    output::success(&format!("Updated {} {}", form.brand.trim(), form.model.trim()));
    output::field("Revision", doc.rev.as_str());

    Ok(())
}
