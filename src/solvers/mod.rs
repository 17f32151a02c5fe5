//! Solvers dedicated to the semantics of abstract argumentation frameworks.

mod grounded_semantics_solver;
pub use grounded_semantics_solver::GroundedSemanticsSolver;

mod initial_sets_solver;
pub use initial_sets_solver::InitialSetsSolver;

mod minimal_extension_computer;
pub(crate) use minimal_extension_computer::compute_initial_sets;
pub(crate) use minimal_extension_computer::retain_unchallenged;
pub(crate) use minimal_extension_computer::EnumerationStep;
pub(crate) use minimal_extension_computer::InitialSetEnumerator;

mod preferred_semantics_solver;
pub use preferred_semantics_solver::PreferredSemanticsSolver;

mod specs;
pub use specs::CredulousAcceptanceComputer;
pub use specs::ExtensionEnumerator;
pub use specs::SingleExtensionComputer;
pub use specs::SkepticalAcceptanceComputer;

mod unchallenged_semantics_solver;
pub use unchallenged_semantics_solver::UnchallengedSemanticsSolver;

mod utils;
