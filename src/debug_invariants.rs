//! Invariant checking for tables and entity sets.
//!
//! Checks run in debug builds, or in any build with the `strict-invariants`
//! or `check-invariants` feature enabled.

use crate::mesh_error::MeshError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Panic on a violated invariant when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants::check_enabled!(self.validate_invariants(), std::any::type_name::<Self>());
    }
}

/// Evaluate `$check` and panic with its error, only in builds that check
/// invariants.
macro_rules! check_enabled {
    ($check:expr, $what:expr) => {
        if cfg!(any(
            debug_assertions,
            feature = "strict-invariants",
            feature = "check-invariants"
        )) {
            if let Err(err) = $check {
                panic!("{} invariant violated: {err}", $what);
            }
        }
    };
}
pub(crate) use check_enabled;
