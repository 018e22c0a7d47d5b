//! Top-level module for connectivity data structures.
//!
//! This module provides the tables meshes use to describe and number their
//! entities:
//! - [`table::Table`]: compressed row storage of incidence lists
//! - [`stable::STable`] and [`dstable::DSTable`]: symmetric pair tables
//! - [`face_table::FaceTable`]: face lookup by vertex tuple
//! - [`cell_type::CellType`] and [`entity::EntityKind`]: element geometries
//!   and entity kinds

pub mod cell_type;
pub mod dstable;
pub mod entity;
pub mod face_table;
pub mod stable;
pub mod table;

pub use dstable::DSTable;
pub use face_table::FaceTable;
pub use stable::STable;
pub use table::Table;
