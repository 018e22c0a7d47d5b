//! Re-export public algorithms.

pub mod table_ops;

pub use table_ops::{mult, mult_into, transpose, transpose_array, transpose_into};
