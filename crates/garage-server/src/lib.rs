//! garage-server - HTTP API for the my-garage vehicle inventory.
//!
//! Five JSON routes proxy create/read/update/delete onto a [`DocumentStore`]:
//!
//! | Method   | Path           | Result                         |
//! |----------|----------------|--------------------------------|
//! | `POST`   | `/create`      | the created document           |
//! | `GET`    | `/readall`     | every document                 |
//! | `GET`    | `/read/:id`    | one document                   |
//! | `PUT`    | `/update/:id`  | the merged document            |
//! | `DELETE` | `/delete/:id`  | `{ "ok": true, "id", "rev" }`  |
//!
//! Every failure is reported as `500` with body `{ "error": message }`.
//!
//! ```ignore
//! use std::sync::Arc;
//! use garage_file::FileStore;
//! use garage_server::{Inventory, router};
//!
//! let inventory = Arc::new(Inventory::new(FileStore::new("/tmp/garage", "my-garage")));
//! let app = router(inventory);
//! ```
//!
//! [`DocumentStore`]: garage_core::DocumentStore

pub mod config;
pub mod error;
pub mod inventory;
pub mod routes;
pub mod store;

pub use config::ServerConfig;
pub use error::ApiError;
pub use inventory::Inventory;
pub use routes::router;
pub use store::AnyStore;
