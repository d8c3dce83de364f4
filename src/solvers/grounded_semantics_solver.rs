use super::{
    utils::model_to_extension, CredulousAcceptanceComputer, SingleExtensionComputer,
    SkepticalAcceptanceComputer,
};
use crate::{
    aa::{AAFramework, Argument, LabelType},
    circ::{CircSolver, SolvingOptions},
    encodings::{SemanticsEncoding, VarAllocator},
};
use anyhow::{anyhow, Context, Result};

/// A solver used to solve queries for the grounded semantics.
///
/// The (unique) grounded extension is the minimal complete extension.
/// It is computed by a single call to the circumscription solver, minimizing the complete extensions,
/// with the preprocessing of the solver disabled.
///
/// This solver implements [SingleExtensionComputer] and both [CredulousAcceptanceComputer] and [SkepticalAcceptanceComputer] interfaces.
/// In these three cases, the computation resumes to the computation of the grounded extension.
pub struct GroundedSemanticsSolver<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    solver: &'a dyn CircSolver,
}

impl<'a, T> GroundedSemanticsSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new solver dedicated to the grounded semantics.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::{AAFramework, LabelType};
    /// # use circabri::circ::CircSolver;
    /// # use circabri::solvers::{SingleExtensionComputer, GroundedSemanticsSolver};
    /// fn search_one_extension<T>(af: &AAFramework<T>, circ_solver: &dyn CircSolver) where T: LabelType {
    ///     let mut solver = GroundedSemanticsSolver::new(af, circ_solver);
    ///     let ext = solver.compute_one_extension().unwrap().unwrap();
    ///     println!("found the grounded extension: {:?}", ext);
    /// }
    /// ```
    pub fn new(af: &'a AAFramework<T>, solver: &'a dyn CircSolver) -> Self {
        Self { af, solver }
    }

    /// Computes the grounded extension.
    ///
    /// An error is returned if the solver fails or reports no model, since the grounded extension always exists.
    pub fn grounded_extension(&self) -> Result<Vec<&'a Argument<T>>> {
        let context = "while computing the grounded extension";
        let instance = SemanticsEncoding::Grounded
            .encode(self.af)
            .context(context)?;
        let model = self
            .solver
            .solve(
                &instance,
                SolvingOptions::single_model().without_preprocessing(),
            )
            .context(context)?
            .first_model()
            .ok_or_else(|| anyhow!("the solver found no complete extension"))
            .context(context)?;
        Ok(model_to_extension(
            &model,
            self.af,
            &VarAllocator::new(self.af),
        ))
    }
}

impl<T> SingleExtensionComputer<T> for GroundedSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn compute_one_extension(&mut self) -> Result<Option<Vec<&Argument<T>>>> {
        self.grounded_extension().map(Some)
    }
}

impl<T> CredulousAcceptanceComputer<T> for GroundedSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        Ok(self.grounded_extension()?.contains(&arg))
    }
}

impl<T> SkepticalAcceptanceComputer<T> for GroundedSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_skeptically_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        Ok(self.grounded_extension()?.contains(&arg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        circ::{brute_force_solver, BufferedCircSolver},
        solvers::utils::tests::{labels, read_apx},
    };
    use std::io::Read;

    #[test]
    fn test_grounded_solver() {
        let af = read_apx("arg(a0).\narg(a1).\natt(a0,a1).\n");
        let circ_solver = brute_force_solver();
        let mut solver = GroundedSemanticsSolver::new(&af, &circ_solver);
        let ext = solver.compute_one_extension().unwrap().unwrap();
        assert_eq!(vec!["a0"], labels(&ext));
        let a0 = af.argument_set().get_argument(&"a0".to_string()).unwrap();
        let a1 = af.argument_set().get_argument(&"a1".to_string()).unwrap();
        assert!(solver.is_credulously_accepted(a0).unwrap());
        assert!(!solver.is_credulously_accepted(a1).unwrap());
        assert!(solver.is_skeptically_accepted(a0).unwrap());
        assert!(!solver.is_skeptically_accepted(a1).unwrap());
    }

    #[test]
    fn test_grounded_defended_chain() {
        let af = read_apx(
            "arg(a).\narg(b).\narg(c).\narg(d).\narg(e).\natt(a,b).\natt(b,c).\natt(c,d).\natt(d,e).\natt(e,d).\n",
        );
        let circ_solver = brute_force_solver();
        let solver = GroundedSemanticsSolver::new(&af, &circ_solver);
        assert_eq!(
            vec!["a", "c", "e"],
            labels(&solver.grounded_extension().unwrap())
        );
    }

    #[test]
    fn test_grounded_cycle() {
        let af = read_apx("arg(a).\narg(b).\natt(a,b).\natt(b,a).\n");
        let circ_solver = brute_force_solver();
        let solver = GroundedSemanticsSolver::new(&af, &circ_solver);
        assert!(solver.grounded_extension().unwrap().is_empty());
    }

    #[test]
    fn test_grounded_uses_no_preprocessing() {
        let af = read_apx("arg(a).\n");
        let circ_solver = BufferedCircSolver::new(Box::new(
            |_: String, flags: &[String]| -> Result<Box<dyn Read>> {
                assert!(flags.contains(&"--no-pre".to_string()));
                Ok(Box::new("v a\n".as_bytes()))
            },
        ));
        let solver = GroundedSemanticsSolver::new(&af, &circ_solver);
        assert_eq!(vec!["a"], labels(&solver.grounded_extension().unwrap()));
    }

    #[test]
    fn test_grounded_unsat_is_an_error() {
        let af = read_apx("arg(a).\n");
        let circ_solver = BufferedCircSolver::new(Box::new(
            |_: String, _: &[String]| -> Result<Box<dyn Read>> {
                Ok(Box::new("UNSATISFIABLE\n".as_bytes()))
            },
        ));
        let solver = GroundedSemanticsSolver::new(&af, &circ_solver);
        assert!(solver.grounded_extension().is_err());
    }
}
