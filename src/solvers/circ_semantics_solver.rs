use super::{
    utils::model_to_extension, CredulousAcceptanceComputer, ExtensionEnumerator,
    SingleExtensionComputer, SkepticalAcceptanceComputer,
};
use crate::{
    aa::{AAFramework, Argument, LabelType, Semantics},
    circ::{CcnfInstance, CircSolver, Literal, SolvingOptions},
    encodings::{SemanticsEncoding, VarAllocator},
};
use anyhow::{anyhow, Context, Result};

/// A solver for the semantics which extensions are the circumscribed models of a single encoding.
///
/// This solver handles the complete, preferred, stable, semi-stable and stage semantics.
/// Each query is answered by one call to the underlying circumscription solver:
///
/// * credulous acceptance adds the argument as a unit query and checks the satisfiability;
/// * skeptical acceptance adds the negation of the argument as a unit query and checks the unsatisfiability;
/// * the computation of an extension asks for a single model;
/// * the enumeration asks for all the models, and returns each extension once.
///
/// A hard query would change the set of circumscribed models of the semantics that maximize an objective.
/// For this reason, the credulous acceptance under the semi-stable and stage semantics,
/// as well as the skeptical acceptance under the preferred, semi-stable and stage semantics,
/// are computed by enumerating the extensions.
pub struct CircSemanticsSolver<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    solver: &'a dyn CircSolver,
    semantics: Semantics,
    encoding: SemanticsEncoding,
}

impl<'a, T> CircSemanticsSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new solver for the provided semantics.
    ///
    /// An error is returned if the semantics is not one of the complete, preferred, stable, semi-stable and stage semantics.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::{AAFramework, LabelType, Semantics};
    /// # use circabri::circ::CircSolver;
    /// # use circabri::solvers::{CircSemanticsSolver, SingleExtensionComputer};
    /// fn search_one_extension<T>(af: &AAFramework<T>, circ_solver: &dyn CircSolver) where T: LabelType {
    ///     let mut solver = CircSemanticsSolver::new(af, circ_solver, Semantics::PR).unwrap();
    ///     match solver.compute_one_extension().unwrap() {
    ///         Some(ext) => println!("found a preferred extension: {:?}", ext),
    ///         None => unreachable!(),
    ///     }
    /// }
    /// ```
    pub fn new(
        af: &'a AAFramework<T>,
        solver: &'a dyn CircSolver,
        semantics: Semantics,
    ) -> Result<Self> {
        let encoding = match semantics {
            Semantics::CO | Semantics::PR | Semantics::ST | Semantics::SST | Semantics::STG => {
                SemanticsEncoding::try_from(semantics)?
            }
            Semantics::GR | Semantics::ID => {
                return Err(anyhow!(
                    "the {} semantics must be solved with its dedicated solver",
                    semantics.as_ref()
                ))
            }
        };
        Ok(Self {
            af,
            solver,
            semantics,
            encoding,
        })
    }

    fn enumeration_options(&self) -> SolvingOptions {
        match self.semantics {
            Semantics::PR => SolvingOptions::all_models().with_single_witness(),
            _ => SolvingOptions::all_models(),
        }
    }

    fn query_literal(&self, arg: &Argument<T>) -> Literal {
        VarAllocator::new(self.af).truth_var(arg).positive()
    }

    fn has_model_with_query(&self, query: Literal) -> Result<bool> {
        let mut instance = self.encode()?;
        instance.set_query(query)?;
        Ok(self
            .solver
            .solve(&instance, SolvingOptions::single_model())?
            .is_satisfiable())
    }

    fn encode(&self) -> Result<CcnfInstance> {
        self.encoding.encode(self.af)
    }

    fn context(&self, query: &str) -> String {
        format!(
            "while solving {} under the {} semantics",
            query,
            self.semantics.as_ref()
        )
    }
}

impl<T> SingleExtensionComputer<T> for CircSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn compute_one_extension(&mut self) -> Result<Option<Vec<&Argument<T>>>> {
        let instance = self.encode()?;
        let vars = VarAllocator::new(self.af);
        let result = self
            .solver
            .solve(&instance, SolvingOptions::single_model())
            .with_context(|| self.context("SE"))?;
        Ok(result
            .first_model()
            .map(|m| model_to_extension(&m, self.af, &vars)))
    }
}

impl<T> ExtensionEnumerator<T> for CircSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn enumerate_extensions(&mut self) -> Result<Vec<Vec<&Argument<T>>>> {
        let instance = self.encode()?;
        let vars = VarAllocator::new(self.af);
        let result = self
            .solver
            .solve(&instance, self.enumeration_options())
            .with_context(|| self.context("EE"))?;
        let mut extensions: Vec<Vec<&Argument<T>>> = vec![];
        for model in result.into_models().iter() {
            let ext = model_to_extension(model, self.af, &vars);
            if !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        Ok(extensions)
    }
}

impl<T> CredulousAcceptanceComputer<T> for CircSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        match self.semantics {
            Semantics::SST | Semantics::STG => Ok(self
                .enumerate_extensions()?
                .iter()
                .any(|ext| ext.contains(&arg))),
            _ => self
                .has_model_with_query(self.query_literal(arg))
                .with_context(|| self.context("DC")),
        }
    }
}

impl<T> SkepticalAcceptanceComputer<T> for CircSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_skeptically_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        match self.semantics {
            Semantics::PR | Semantics::SST | Semantics::STG => Ok(self
                .enumerate_extensions()?
                .iter()
                .all(|ext| ext.contains(&arg))),
            _ => self
                .has_model_with_query(self.query_literal(arg).negate())
                .map(|sat| !sat)
                .with_context(|| self.context("DS")),
        }
    }
}
