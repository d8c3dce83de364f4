use super::{
    utils::model_to_extension, CredulousAcceptanceComputer, SingleExtensionComputer,
    SkepticalAcceptanceComputer,
};
use crate::{
    aa::{AAFramework, Argument, LabelType},
    circ::{CcnfInstance, CircSolver, Literal, ObjectiveSense, SolvingOptions},
    encodings::{SemanticsEncoding, VarAllocator},
};
use anyhow::{anyhow, Context, Result};
use log::debug;

/// A solver used to solve queries for the ideal semantics.
///
/// The ideal extension is the maximal admissible set contained in every preferred extension.
/// It is computed in three steps:
///
/// 1. the union of all the admissible sets is computed by repeatedly asking the solver for an admissible set
///    that is maximal on the arguments not yet in the union, until no new argument is found;
/// 2. the arguments that are out of this union, or that are attacked by an argument of the union, are discarded;
/// 3. the ideal extension is the maximal admissible set made of non-discarded arguments.
///
/// Credulous and skeptical acceptance coincide, and are checked by membership to the ideal extension.
pub struct IdealSemanticsSolver<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    solver: &'a dyn CircSolver,
}

impl<'a, T> IdealSemanticsSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new solver dedicated to the ideal semantics.
    pub fn new(af: &'a AAFramework<T>, solver: &'a dyn CircSolver) -> Self {
        Self { af, solver }
    }

    fn admissible_instance(&self, objective: Vec<Literal>) -> Result<CcnfInstance> {
        let mut instance = SemanticsEncoding::Admissible.encode(self.af)?;
        instance.set_objective(ObjectiveSense::Maximize, objective)?;
        Ok(instance)
    }

    fn maximal_admissible_set(&self, instance: &CcnfInstance) -> Result<Vec<&'a Argument<T>>> {
        let model = self
            .solver
            .solve(instance, SolvingOptions::single_model())?
            .first_model()
            .ok_or_else(|| anyhow!("the solver found no admissible set"))?;
        Ok(model_to_extension(
            &model,
            self.af,
            &VarAllocator::new(self.af),
        ))
    }

    fn union_of_admissible_sets(&self) -> Result<Vec<bool>> {
        let vars = VarAllocator::new(self.af);
        let mut in_union = vec![false; self.af.n_arguments() + 1];
        let mut round = 0;
        loop {
            round += 1;
            let objective = self
                .af
                .argument_set()
                .iter()
                .filter(|a| !in_union[a.id()])
                .map(|a| vars.truth_var(a).positive())
                .collect();
            let instance = self.admissible_instance(objective)?;
            let mut n_new = 0;
            for arg in self.maximal_admissible_set(&instance)? {
                if !in_union[arg.id()] {
                    in_union[arg.id()] = true;
                    n_new += 1;
                }
            }
            debug!(
                "admissible union round {}: {} new argument(s)",
                round, n_new
            );
            if n_new == 0 {
                return Ok(in_union);
            }
        }
    }

    fn discarded_arguments(&self) -> Result<Vec<bool>> {
        let in_union = self.union_of_admissible_sets()?;
        let discarded = (0..=self.af.n_arguments())
            .map(|id| {
                id == 0
                    || !in_union[id]
                    || self
                        .af
                        .iter_attacks_to_id(id)
                        .any(|att| in_union[att.attacker().id()])
            })
            .collect::<Vec<bool>>();
        debug!(
            "{} argument(s) remain as ideal candidates",
            discarded.iter().filter(|d| !**d).count()
        );
        Ok(discarded)
    }

    fn ideal_extension_among(&self, discarded: &[bool]) -> Result<Vec<&'a Argument<T>>> {
        let vars = VarAllocator::new(self.af);
        let objective = self
            .af
            .argument_set()
            .iter()
            .filter(|a| !discarded[a.id()])
            .map(|a| vars.truth_var(a).positive())
            .collect();
        let mut instance = self.admissible_instance(objective)?;
        for arg in self.af.argument_set().iter().filter(|a| discarded[a.id()]) {
            instance.add_clause(vec![vars.truth_var(arg).negative()])?;
        }
        self.maximal_admissible_set(&instance)
    }

    /// Computes the ideal extension.
    pub fn ideal_extension(&self) -> Result<Vec<&'a Argument<T>>> {
        let context = "while computing the ideal extension";
        let discarded = self.discarded_arguments().context(context)?;
        self.ideal_extension_among(&discarded).context(context)
    }

    fn is_in_ideal_extension(&self, arg: &Argument<T>) -> Result<bool> {
        let context = "while checking the membership to the ideal extension";
        let discarded = self.discarded_arguments().context(context)?;
        if discarded[arg.id()] {
            return Ok(false);
        }
        Ok(self
            .ideal_extension_among(&discarded)
            .context(context)?
            .contains(&arg))
    }
}

impl<T> SingleExtensionComputer<T> for IdealSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn compute_one_extension(&mut self) -> Result<Option<Vec<&Argument<T>>>> {
        self.ideal_extension().map(Some)
    }
}

impl<T> CredulousAcceptanceComputer<T> for IdealSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        self.is_in_ideal_extension(arg)
    }
}

impl<T> SkepticalAcceptanceComputer<T> for IdealSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_skeptically_accepted(&mut self, arg: &Argument<T>) -> Result<bool> {
        self.is_in_ideal_extension(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        circ::{brute_force_solver, brute_force_solving_fn, BufferedCircSolver, SolvingFn},
        solvers::utils::tests::{labels, read_apx},
    };
    use std::{cell::Cell, rc::Rc};

    fn ideal(instance: &str) -> Vec<String> {
        let af = read_apx(instance);
        let circ_solver = brute_force_solver();
        let solver = IdealSemanticsSolver::new(&af, &circ_solver);
        labels(&solver.ideal_extension().unwrap())
    }

    #[test]
    fn test_ideal_no_attacks() {
        assert_eq!(vec!["a", "b"], ideal("arg(a).\narg(b).\n"));
    }

    #[test]
    fn test_ideal_cycle() {
        assert!(ideal("arg(a).\narg(b).\natt(a,b).\natt(b,a).\n").is_empty());
    }

    #[test]
    fn test_ideal_odd_cycle() {
        assert!(ideal("arg(a).\narg(b).\narg(c).\natt(a,b).\natt(b,c).\natt(c,a).\n").is_empty());
    }

    #[test]
    fn test_ideal_larger_than_grounded() {
        assert_eq!(
            vec!["a"],
            ideal("arg(a).\narg(b).\natt(a,b).\natt(b,a).\natt(b,b).\n")
        );
    }

    #[test]
    fn test_ideal_must_be_admissible() {
        // d is in every preferred extension but cannot defend itself without a or b
        let instance =
            "arg(a).\narg(b).\narg(c).\narg(d).\natt(a,b).\natt(b,a).\natt(a,c).\natt(b,c).\natt(c,d).\n";
        assert!(ideal(instance).is_empty());
    }

    #[test]
    fn test_ideal_self_attack() {
        assert_eq!(
            vec!["b"],
            ideal("arg(a).\narg(b).\narg(c).\natt(a,a).\natt(a,c).\n")
        );
    }

    #[test]
    fn test_ideal_acceptance() {
        let af = read_apx("arg(a).\narg(b).\narg(c).\natt(a,b).\natt(b,a).\natt(b,b).\natt(b,c).\n");
        let circ_solver = brute_force_solver();
        let mut solver = IdealSemanticsSolver::new(&af, &circ_solver);
        let arg = |s: &str| af.argument_set().get_argument(&s.to_string()).unwrap();
        assert!(solver.is_credulously_accepted(arg("a")).unwrap());
        assert!(solver.is_skeptically_accepted(arg("c")).unwrap());
        assert!(!solver.is_credulously_accepted(arg("b")).unwrap());
        assert!(!solver.is_skeptically_accepted(arg("b")).unwrap());
    }

    fn counting_solver(counter: Rc<Cell<usize>>) -> BufferedCircSolver {
        let inner: Box<SolvingFn> = brute_force_solving_fn();
        BufferedCircSolver::new(Box::new(
            move |instance: String, flags: &[String]| -> Result<Box<dyn std::io::Read>> {
                counter.set(counter.get() + 1);
                inner(instance, flags)
            },
        ))
    }

    #[test]
    fn test_discarded_argument_needs_no_final_call() {
        let af = read_apx("arg(a).\narg(b).\natt(a,b).\natt(b,a).\n");
        let counter = Rc::new(Cell::new(0));
        let circ_solver = counting_solver(Rc::clone(&counter));
        let mut solver = IdealSemanticsSolver::new(&af, &circ_solver);
        let a = af.argument_set().get_argument(&"a".to_string()).unwrap();
        assert!(!solver.is_credulously_accepted(a).unwrap());
        let calls_for_discarded = counter.get();
        counter.set(0);
        solver.ideal_extension().unwrap();
        assert_eq!(calls_for_discarded + 1, counter.get());
    }
}
