use super::{Literal, Variable};
use anyhow::{anyhow, Result};
use std::{collections::HashMap, fmt::Display, io::Write};

const DEFAULT_BUFFER_CAP: usize = 1 << 16;

/// The direction in which the circumscription solver optimizes the objective literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// Models are subset-maximal on the objective literals.
    Maximize,
    /// Models are subset-minimal on the objective literals.
    Minimize,
}

impl ObjectiveSense {
    fn preamble_symbol(&self) -> char {
        match self {
            ObjectiveSense::Maximize => '+',
            ObjectiveSense::Minimize => '-',
        }
    }
}

/// A circumscription-augmented CNF instance.
///
/// An instance is made of an objective (a sense and a list of literals), a name table mapping some variables to names,
/// a set of hard clauses and an optional query literal.
/// The solver reports its models as the lists of names which variables are set to true.
///
/// All the variables involved in an instance must be lower or equal to the maximal variable given at its creation;
/// trying to add a literal that does not comply with this rule results in an error.
///
/// # Example
///
/// ```
/// # use circabri::circ::{CcnfInstance, Literal, ObjectiveSense, Variable};
/// let mut instance = CcnfInstance::new(2);
/// instance.add_name(Variable::from(1usize), "a").unwrap();
/// instance.add_name(Variable::from(2usize), "b").unwrap();
/// instance
///     .set_objective(ObjectiveSense::Maximize, vec![Literal::from(1), Literal::from(2)])
///     .unwrap();
/// instance.add_clause(vec![Literal::from(-1), Literal::from(-2)]).unwrap();
/// assert_eq!(
///     "p ccnf +\no 1 2 0\nv 1 a\nv 2 b\n-1 -2 0\n",
///     instance.to_string()
/// );
/// ```
pub struct CcnfInstance {
    max_var: usize,
    sense: ObjectiveSense,
    objective: Vec<Literal>,
    names: Vec<(Variable, String)>,
    name_to_var: HashMap<String, Variable>,
    clauses: String,
    n_clauses: usize,
    query: Option<Literal>,
}

impl CcnfInstance {
    /// Builds an empty instance which variables range from 1 to `max_var`.
    ///
    /// The instance has no objective literal, and its objective sense is [`ObjectiveSense::Minimize`].
    pub fn new(max_var: usize) -> Self {
        Self {
            max_var,
            sense: ObjectiveSense::Minimize,
            objective: vec![],
            names: vec![],
            name_to_var: HashMap::new(),
            clauses: String::with_capacity(DEFAULT_BUFFER_CAP),
            n_clauses: 0,
            query: None,
        }
    }

    fn check_lit(&self, l: &Literal) -> Result<()> {
        let v = usize::from(l.var());
        if v > self.max_var {
            Err(anyhow!(
                "variable {} is out of bounds (max variable is {})",
                v,
                self.max_var
            ))
        } else {
            Ok(())
        }
    }

    /// Associates a name to a variable.
    ///
    /// Names are used by the solver to report its models.
    /// An error is returned if the name is empty, contains whitespace, is already in use, or if the variable is out of bounds.
    pub fn add_name(&mut self, var: Variable, name: &str) -> Result<()> {
        self.check_lit(&var.positive())?;
        if name.is_empty() || name.chars().any(|c| c.is_whitespace()) {
            return Err(anyhow!(
                r#"cannot use "{}" as a variable name; names must be nonempty and contain no whitespace"#,
                name
            ));
        }
        if self.name_to_var.contains_key(name) {
            return Err(anyhow!(r#"the name "{}" is already in use"#, name));
        }
        self.name_to_var.insert(name.to_string(), var);
        self.names.push((var, name.to_string()));
        Ok(())
    }

    /// Sets the objective of the instance, replacing the previous one.
    pub fn set_objective(&mut self, sense: ObjectiveSense, objective: Vec<Literal>) -> Result<()> {
        objective.iter().try_for_each(|l| self.check_lit(l))?;
        self.sense = sense;
        self.objective = objective;
        Ok(())
    }

    /// Adds a hard clause to the instance.
    pub fn add_clause(&mut self, cl: Vec<Literal>) -> Result<()> {
        cl.iter().try_for_each(|l| self.check_lit(l))?;
        cl.iter().for_each(|l| {
            self.clauses.push_str(&l.to_string());
            self.clauses.push(' ');
        });
        self.clauses.push_str("0\n");
        self.n_clauses += 1;
        Ok(())
    }

    /// Sets the query literal, which is written as a unit clause after the hard clauses.
    ///
    /// Setting a new query replaces the previous one.
    pub fn set_query(&mut self, query: Literal) -> Result<()> {
        self.check_lit(&query)?;
        self.query = Some(query);
        Ok(())
    }

    /// Returns the variable associated with a name, if any.
    pub fn var_of_name(&self, name: &str) -> Option<Variable> {
        self.name_to_var.get(name).copied()
    }

    /// Returns the number of variables of the instance.
    pub fn n_vars(&self) -> usize {
        self.max_var
    }

    /// Returns the number of clauses of the instance, including the query.
    pub fn n_clauses(&self) -> usize {
        self.n_clauses + usize::from(self.query.is_some())
    }

    /// Writes the instance in the ccnf format.
    pub fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "p ccnf {}", self.sense.preamble_symbol())?;
        write!(writer, "o ")?;
        for l in self.objective.iter() {
            write!(writer, "{} ", l)?;
        }
        writeln!(writer, "0")?;
        for (v, name) in self.names.iter() {
            writeln!(writer, "v {} {}", v, name)?;
        }
        writer.write_all(self.clauses.as_bytes())?;
        if let Some(q) = self.query {
            writeln!(writer, "{} 0", q)?;
        }
        writer.flush()
    }
}

impl Display for CcnfInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", String::from_utf8_lossy(&buffer))
    }
}
