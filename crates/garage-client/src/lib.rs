//! garage-client - Client library for the my-garage inventory API.
//!
//! [`ApiClient`] wraps the five HTTP routes. [`Garage`] keeps a local,
//! id-keyed copy of the inventory and drives the add/edit/delete flows
//! through [`VehicleForm`].
//!
//! ```ignore
//! use garage_client::{ApiClient, Garage, VehicleForm};
//!
//! let mut garage = Garage::new(ApiClient::new("http://localhost:4000")?);
//! garage.load().await?;
//!
//! let form = VehicleForm { brand: "Toyota".into(), ..Default::default() };
//! // Fails locally with "Please fill in all fields!" without a request.
//! assert!(garage.create(&form).await.is_err());
//! ```

pub mod api;
pub mod error;
pub mod form;
pub mod garage;

pub use api::ApiClient;
pub use error::{ClientError, FormError};
pub use form::VehicleForm;
pub use garage::Garage;
