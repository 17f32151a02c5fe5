//! Objects used to encode semantics into SAT solvers.

mod aux_var_constraints_encoder;
pub use aux_var_constraints_encoder::encode_non_emptiness;
pub use aux_var_constraints_encoder::encode_non_emptiness_in_subset;
pub use aux_var_constraints_encoder::new_for_admissibility;
pub use aux_var_constraints_encoder::new_for_complete_semantics;
pub use aux_var_constraints_encoder::new_for_conflict_freeness;
pub use aux_var_constraints_encoder::AuxVarConstraintsEncoder;

mod specs;
pub use specs::ConstraintsEncoder;
