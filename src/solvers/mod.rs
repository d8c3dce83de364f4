//! Solvers used for Abstract Argumentation frameworks.
//!
//! Each solver relies on a circumscription solver (see [`CircSolver`](crate::circ::CircSolver))
//! to which it sends the encodings of the semantics.

mod circ_semantics_solver;
pub use circ_semantics_solver::CircSemanticsSolver;

mod d3_solver;
pub use d3_solver::D3Result;
pub use d3_solver::D3Solver;

mod grounded_semantics_solver;
pub use grounded_semantics_solver::GroundedSemanticsSolver;

mod ideal_semantics_solver;
pub use ideal_semantics_solver::IdealSemanticsSolver;

mod specs;
pub use specs::CredulousAcceptanceComputer;
pub use specs::ExtensionEnumerator;
pub use specs::SingleExtensionComputer;
pub use specs::SkepticalAcceptanceComputer;

mod utils;
