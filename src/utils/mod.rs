//! Miscellaneous components used in the library.

mod grounded_extension_computer;
pub use grounded_extension_computer::grounded_extension;
pub use grounded_extension_computer::grounded_status_of;
pub use grounded_extension_computer::GroundedStatus;

#[cfg(test)]
pub(crate) mod naive_semantics;

mod reduct_computer;
pub use reduct_computer::reduct;

mod scc_computer;
pub use scc_computer::strongly_connected_components;
