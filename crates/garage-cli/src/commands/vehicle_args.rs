//! Vehicle field flags shared by `add` and `edit`.

use clap::Args;

use garage_client::VehicleForm;

#[derive(Args, Debug, Default)]
pub struct VehicleArgs {
    /// Manufacturer, e.g. Toyota
    #[arg(long)]
    pub brand: Option<String>,

    /// Model name, e.g. Corolla
    #[arg(long)]
    pub model: Option<String>,

    /// Model year
    #[arg(long)]
    pub year: Option<String>,

    /// Paint color
    #[arg(long)]
    pub color: Option<String>,

    /// Engine description
    #[arg(long)]
    pub engine: Option<String>,

    /// License plate
    #[arg(long)]
    pub license_plate: Option<String>,

    /// Owner's name
    #[arg(long)]
    pub owner_name: Option<String>,

    /// Owner's phone or email
    #[arg(long)]
    pub owner_contact: Option<String>,
}

impl VehicleArgs {
    /// Overwrite the form fields given on the command line.
    pub fn apply(self, form: &mut VehicleForm) {
        let fields = [
            (self.brand, &mut form.brand),
            (self.model, &mut form.model),
            (self.year, &mut form.year),
            (self.color, &mut form.color),
            (self.engine, &mut form.engine),
            (self.license_plate, &mut form.license_plate),
            (self.owner_name, &mut form.owner_name),
            (self.owner_contact, &mut form.owner_contact),
        ];

        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}
