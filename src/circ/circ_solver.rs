use super::{CcnfInstance, Variable};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read};

/// The options given to a circumscription solver for a single invocation.
///
/// These options are translated into the solver command line flags.
///
/// # Example
///
/// ```
/// # use circabri::circ::SolvingOptions;
/// assert_eq!(
///     vec!["--mode=circumscription", "-n=0", "--circ-wit=1"],
///     SolvingOptions::all_models().with_single_witness().to_cli_flags()
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolvingOptions {
    enumerate_all: bool,
    one_witness: bool,
    preprocessing: bool,
}

impl SolvingOptions {
    /// Options for a computation stopping at the first model.
    pub fn single_model() -> Self {
        Self {
            enumerate_all: false,
            one_witness: true,
            preprocessing: true,
        }
    }

    /// Options for a computation of all the models, reporting every witness of each circumscribed model.
    pub fn all_models() -> Self {
        Self {
            enumerate_all: true,
            one_witness: false,
            preprocessing: true,
        }
    }

    /// Sets the solver to output a single witness per circumscribed model.
    pub fn with_single_witness(self) -> Self {
        Self {
            one_witness: true,
            ..self
        }
    }

    /// Disables the preprocessing step of the solver.
    pub fn without_preprocessing(self) -> Self {
        Self {
            preprocessing: false,
            ..self
        }
    }

    /// Returns the command line flags corresponding to these options.
    pub fn to_cli_flags(&self) -> Vec<String> {
        let mut flags = vec![
            "--mode=circumscription".to_string(),
            format!("-n={}", if self.enumerate_all { 0 } else { 1 }),
            format!("--circ-wit={}", if self.one_witness { 1 } else { 0 }),
        ];
        if !self.preprocessing {
            flags.push("--no-pre".to_string());
        }
        flags
    }
}

/// A model returned by a circumscription solver, given by the named variables it sets to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model(Vec<Variable>);

impl Model {
    /// Builds a model from the list of its true variables.
    pub fn new(true_vars: Vec<Variable>) -> Self {
        Self(true_vars)
    }

    /// Iterates over the true variables of the model, in the order given by the solver.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.0.iter()
    }

    /// Returns `true` iff the variable is set to true in this model.
    pub fn contains(&self, v: Variable) -> bool {
        self.0.contains(&v)
    }

    /// Returns the number of true named variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` iff no named variable is set to true.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The result of a circumscription solver invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum SolvingResult {
    /// The instance has models; the ones reported by the solver are given in their output order.
    Satisfiable(Vec<Model>),
    /// The instance has no model.
    Unsatisfiable,
}

impl SolvingResult {
    /// Returns the first model if it exists, or [Option::None].
    pub fn first_model(self) -> Option<Model> {
        match self {
            SolvingResult::Satisfiable(models) => models.into_iter().next(),
            SolvingResult::Unsatisfiable => None,
        }
    }

    /// Returns all the models, the vector being empty in case of unsatisfiability.
    pub fn into_models(self) -> Vec<Model> {
        match self {
            SolvingResult::Satisfiable(models) => models,
            SolvingResult::Unsatisfiable => vec![],
        }
    }

    /// Returns `true` iff the instance has at least one model.
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolvingResult::Satisfiable(_))
    }
}

/// A trait for objects listening to solver invocations.
pub trait SolvingListener {
    /// Called before the solver is launched.
    fn solving_start(&self, n_vars: usize, n_clauses: usize, flags: &[String]);

    /// Called when the solver output has been read.
    fn solving_end(&self, result: &SolvingResult);
}

/// A trait for circumscription solvers.
///
/// Each call to [`solve`](Self::solve) is an independent invocation: no state is kept between two calls.
pub trait CircSolver {
    /// Solves a ccnf instance with the given options.
    fn solve(&self, instance: &CcnfInstance, options: SolvingOptions) -> Result<SolvingResult>;

    /// Adds a listener which is notified at each solver invocation.
    fn add_listener(&mut self, listener: Box<dyn SolvingListener>);
}

/// The type of functions that take a serialized instance and the solver flags and return the solver output.
pub type SolvingFn = dyn Fn(String, &[String]) -> Result<Box<dyn Read>>;

/// A circumscription solver relying on a function that takes the serialized instance and returns the solver output.
///
/// This solver is in charge of writing the instance and reading the solver output.
/// The solving function may launch a process, or compute the models by any other mean.
pub struct BufferedCircSolver {
    solving_fn: Box<SolvingFn>,
    listeners: Vec<Box<dyn SolvingListener>>,
}

impl BufferedCircSolver {
    /// Builds a new solver given the solving function.
    pub fn new(solving_fn: Box<SolvingFn>) -> Self {
        Self {
            solving_fn,
            listeners: Vec::new(),
        }
    }
}

impl CircSolver for BufferedCircSolver {
    fn solve(&self, instance: &CcnfInstance, options: SolvingOptions) -> Result<SolvingResult> {
        let flags = options.to_cli_flags();
        self.listeners
            .iter()
            .for_each(|l| l.solving_start(instance.n_vars(), instance.n_clauses(), &flags));
        let solver_output = (self.solving_fn)(instance.to_string(), &flags)?;
        let result = read_solver_output(instance, solver_output)?;
        self.listeners.iter().for_each(|l| l.solving_end(&result));
        Ok(result)
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.listeners.push(listener);
    }
}

fn read_solver_output(instance: &CcnfInstance, output: Box<dyn Read>) -> Result<SolvingResult> {
    let context = "while reading the circumscription solver output";
    let mut models = vec![];
    let mut unsat = false;
    for (i, line) in BufReader::new(output).lines().enumerate() {
        let line = line.context(context)?;
        let line_context = || format!("{} (line {})", context, i + 1);
        let mut words = line.split_whitespace();
        match words.next() {
            None => {}
            Some("c") => {}
            Some("UNSATISFIABLE") if words.next().is_none() => {
                if unsat || !models.is_empty() {
                    return Err(anyhow!("unexpected unsatisfiability line"))
                        .with_context(line_context);
                }
                unsat = true;
            }
            Some("v") => {
                if unsat {
                    return Err(anyhow!("model found after unsatisfiability line"))
                        .with_context(line_context);
                }
                let model = words
                    .map(|name| {
                        instance
                            .var_of_name(name)
                            .ok_or_else(|| anyhow!(r#"unknown name "{}" in model"#, name))
                    })
                    .collect::<Result<Vec<Variable>>>()
                    .with_context(line_context)?;
                models.push(Model::new(model));
            }
            Some(_) => {
                return Err(anyhow!(r#"unexpected line "{}""#, line)).with_context(line_context)
            }
        }
    }
    if unsat {
        Ok(SolvingResult::Unsatisfiable)
    } else if !models.is_empty() {
        Ok(SolvingResult::Satisfiable(models))
    } else {
        Err(anyhow!("the solver output neither a model nor an unsatisfiability line"))
            .context(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circ::clause;
    use std::{cell::RefCell, rc::Rc};

    fn ab_instance() -> CcnfInstance {
        let mut instance = CcnfInstance::new(2);
        instance.add_name(Variable::from(1usize), "a").unwrap();
        instance.add_name(Variable::from(2usize), "b").unwrap();
        instance.add_clause(clause![-1, -2]).unwrap();
        instance
    }

    fn fake_output_solver(output: &'static str) -> BufferedCircSolver {
        BufferedCircSolver::new(Box::new(
            move |_: String, _: &[String]| -> Result<Box<dyn Read>> {
                Ok(Box::new(output.as_bytes()))
            },
        ))
    }

    fn var(v: usize) -> Variable {
        Variable::from(v)
    }

    #[test]
    fn test_input_and_flags() {
        let seen = Rc::new(RefCell::new((String::new(), vec![])));
        let seen_clone = Rc::clone(&seen);
        let solver = BufferedCircSolver::new(Box::new(
            move |instance: String, flags: &[String]| -> Result<Box<dyn Read>> {
                *seen_clone.borrow_mut() = (instance, flags.to_vec());
                Ok(Box::new("UNSATISFIABLE\n".as_bytes()))
            },
        ));
        solver
            .solve(&ab_instance(), SolvingOptions::single_model().without_preprocessing())
            .unwrap();
        assert_eq!("p ccnf -\no 0\nv 1 a\nv 2 b\n-1 -2 0\n", seen.borrow().0);
        assert_eq!(
            vec!["--mode=circumscription", "-n=1", "--circ-wit=1", "--no-pre"],
            seen.borrow().1
        );
    }

    #[test]
    fn test_output_models() {
        let solver = fake_output_solver("c comment\nv a\n\nv b\nc\n");
        let result = solver
            .solve(&ab_instance(), SolvingOptions::all_models())
            .unwrap();
        assert_eq!(
            SolvingResult::Satisfiable(vec![Model::new(vec![var(1)]), Model::new(vec![var(2)])]),
            result
        );
    }

    #[test]
    fn test_output_empty_model() {
        let solver = fake_output_solver("v\n");
        let model = solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .unwrap()
            .first_model()
            .unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_output_unsat() {
        let solver = fake_output_solver("c foo\nUNSATISFIABLE\n");
        let result = solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .unwrap();
        assert!(!result.is_satisfiable());
        assert!(result.into_models().is_empty());
    }

    #[test]
    fn test_output_unknown_name() {
        let solver = fake_output_solver("v a c\n");
        let err = solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .unwrap_err();
        assert_eq!(r#"unknown name "c" in model"#, err.root_cause().to_string());
    }

    #[test]
    fn test_output_model_after_unsat() {
        let solver = fake_output_solver("UNSATISFIABLE\nv a\n");
        assert!(solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .is_err());
    }

    #[test]
    fn test_output_unsat_after_model() {
        let solver = fake_output_solver("v a\nUNSATISFIABLE\n");
        assert!(solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .is_err());
    }

    #[test]
    fn test_output_unexpected_line() {
        let solver = fake_output_solver("s SATISFIABLE\n");
        let err = solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .unwrap_err();
        assert_eq!(
            r#"unexpected line "s SATISFIABLE""#,
            err.root_cause().to_string()
        );
    }

    #[test]
    fn test_output_no_status() {
        let solver = fake_output_solver("c nothing\n");
        assert!(solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .is_err());
    }

    #[test]
    fn test_solving_fn_error() {
        let solver = BufferedCircSolver::new(Box::new(
            |_: String, _: &[String]| -> Result<Box<dyn Read>> { Err(anyhow!("cannot launch")) },
        ));
        assert!(solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .is_err());
    }

    struct CountingListener(Rc<RefCell<(usize, usize)>>);

    impl SolvingListener for CountingListener {
        fn solving_start(&self, _n_vars: usize, _n_clauses: usize, _flags: &[String]) {
            self.0.borrow_mut().0 += 1;
        }

        fn solving_end(&self, _result: &SolvingResult) {
            self.0.borrow_mut().1 += 1;
        }
    }

    #[test]
    fn test_listeners() {
        let counts = Rc::new(RefCell::new((0, 0)));
        let mut solver = fake_output_solver("v a\n");
        solver.add_listener(Box::new(CountingListener(Rc::clone(&counts))));
        solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .unwrap();
        solver
            .solve(&ab_instance(), SolvingOptions::single_model())
            .unwrap();
        assert_eq!((2, 2), *counts.borrow());
    }

    #[test]
    fn test_options_flags() {
        assert_eq!(
            vec!["--mode=circumscription", "-n=1", "--circ-wit=1"],
            SolvingOptions::single_model().to_cli_flags()
        );
        assert_eq!(
            vec!["--mode=circumscription", "-n=0", "--circ-wit=0"],
            SolvingOptions::all_models().to_cli_flags()
        );
    }
}
