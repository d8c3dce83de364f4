use super::{utils::model_to_extension, GroundedSemanticsSolver};
use crate::{
    aa::{AAFramework, Argument, LabelType},
    circ::{CircSolver, SolvingOptions},
    encodings::{SemanticsEncoding, VarAllocator},
};
use anyhow::{Context, Result};
use log::debug;

/// The grounded, stable and preferred extensions of a framework.
pub struct D3Result<'a, T>
where
    T: LabelType,
{
    /// The grounded extension.
    pub grounded: Vec<&'a Argument<T>>,
    /// The stable extensions.
    pub stable: Vec<Vec<&'a Argument<T>>>,
    /// The preferred extensions.
    pub preferred: Vec<Vec<&'a Argument<T>>>,
}

/// A solver computing at once the grounded, stable and preferred extensions of a framework.
///
/// The grounded extension is computed first.
/// Since it is contained in every preferred extension, the preferred extensions are then enumerated
/// with the grounded arguments set to true.
/// Finally, the stable extensions are the preferred extensions that attack every argument they do not contain.
pub struct D3Solver<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    solver: &'a dyn CircSolver,
}

impl<'a, T> D3Solver<'a, T>
where
    T: LabelType,
{
    /// Builds a new D3 solver.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::{AAFramework, LabelType};
    /// # use circabri::circ::CircSolver;
    /// # use circabri::solvers::D3Solver;
    /// fn describe<T>(af: &AAFramework<T>, circ_solver: &dyn CircSolver) where T: LabelType {
    ///     let result = D3Solver::new(af, circ_solver).compute().unwrap();
    ///     println!(
    ///         "{} stable and {} preferred extension(s)",
    ///         result.stable.len(),
    ///         result.preferred.len()
    ///     );
    /// }
    /// ```
    pub fn new(af: &'a AAFramework<T>, solver: &'a dyn CircSolver) -> Self {
        Self { af, solver }
    }

    /// Computes the grounded, stable and preferred extensions.
    pub fn compute(&self) -> Result<D3Result<'a, T>> {
        let context = "while solving the D3 problem";
        let grounded = GroundedSemanticsSolver::new(self.af, self.solver)
            .grounded_extension()
            .context(context)?;
        debug!("D3: grounded extension has {} argument(s)", grounded.len());
        let preferred = self.preferred_extensions(&grounded).context(context)?;
        debug!("D3: found {} preferred extension(s)", preferred.len());
        let stable = preferred
            .iter()
            .filter(|ext| self.af.is_stable_extension(ext))
            .cloned()
            .collect::<Vec<Vec<&Argument<T>>>>();
        debug!("D3: found {} stable extension(s)", stable.len());
        Ok(D3Result {
            grounded,
            stable,
            preferred,
        })
    }

    fn preferred_extensions(
        &self,
        grounded: &[&'a Argument<T>],
    ) -> Result<Vec<Vec<&'a Argument<T>>>> {
        let vars = VarAllocator::new(self.af);
        let mut instance = SemanticsEncoding::Preferred.encode(self.af)?;
        for arg in grounded {
            instance.add_clause(vec![vars.truth_var(arg).positive()])?;
        }
        let mut extensions: Vec<Vec<&'a Argument<T>>> = vec![];
        for model in self
            .solver
            .solve(
                &instance,
                SolvingOptions::all_models().with_single_witness(),
            )?
            .into_models()
            .iter()
        {
            let ext = model_to_extension(model, self.af, &vars);
            if !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        Ok(extensions)
    }
}
