//! Interfaces to circumscription solvers.
//!
//! Instances are written in the ccnf format (a CNF formula augmented with an objective and a name table),
//! and the models are read back as lists of names.

#[cfg(test)]
mod brute_force_solver;
#[cfg(test)]
pub(crate) use brute_force_solver::{brute_force_solver, brute_force_solving_fn};

mod ccnf_instance;
pub use ccnf_instance::CcnfInstance;
pub use ccnf_instance::ObjectiveSense;

mod circ_solver;
pub use circ_solver::BufferedCircSolver;
pub use circ_solver::CircSolver;
pub use circ_solver::Model;
pub use circ_solver::SolvingFn;
pub use circ_solver::SolvingListener;
pub use circ_solver::SolvingOptions;
pub use circ_solver::SolvingResult;

mod external_circ_solver;
pub use external_circ_solver::ExternalCircSolver;

mod literal;
#[cfg(test)]
pub(crate) use literal::clause;
pub use literal::Literal;
pub use literal::Variable;
