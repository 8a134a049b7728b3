//! `convoy-catalog` — vehicle descriptor data for the `rust_convoy`
//! workspace.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`desc`]    | `VehicleDesc` + derived force/power/brake curves        |
//! | [`catalog`] | `VehicleCatalog` — indexed collection, CSV loading      |
//! | [`error`]   | `CatalogError`, `CatalogResult<T>`                      |
//!
//! Descriptors are static data: the physics layer (convoy-physics) consumes
//! them through read-only queries and never mutates them.  A host embedding
//! this workspace can bypass the CSV loader entirely and build descriptors
//! from its own data source via [`VehicleCatalog::push`].

pub mod catalog;
pub mod desc;
pub mod error;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use catalog::VehicleCatalog;
pub use desc::{GEAR_FACTOR, VehicleDesc};
pub use error::{CatalogError, CatalogResult};
