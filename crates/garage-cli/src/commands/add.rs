//! Add command implementation.

use anyhow::{Context, Result};
use clap::Args;

use garage_client::{Garage, VehicleForm};

use super::vehicle_args::VehicleArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub vehicle: VehicleArgs,
}

pub async fn run(args: AddArgs, mut garage: Garage) -> Result<()> {
    let mut form = VehicleForm::default();
    args.vehicle.apply(&mut form);

    // Reject an incomplete form before talking to the server.
    form.validate()?;

    let doc = garage
        .create(&form)
        .await
        .context("Failed to add vehicle")?;

    output::success(&format!("Added {} {}", form.brand.trim(), form.model.trim()));
    output::field("ID", doc.id.as_str());

    Ok(())
}
