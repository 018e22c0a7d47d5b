//! Named entity sets and their maintenance across refinement.

pub mod entity_sets;
pub(crate) mod named;
pub mod nc_entity_sets;
mod refine;

pub use entity_sets::EntitySets;
pub use nc_entity_sets::NcEntitySets;
