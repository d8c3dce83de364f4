use anyhow::{anyhow, Context, Result};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

/// The semantics associated with a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum Semantics {
    /// The complete semantics
    CO,
    /// The preferred semantics
    PR,
    /// The stable semantics
    ST,
    /// The semi-stable semantics
    SST,
    /// The stage semantics
    STG,
    /// The grounded semantics
    GR,
    /// The ideal semantics
    ID,
}

impl Semantics {
    /// Returns `true` iff the semantics admits exactly one extension for every framework.
    pub fn is_single_status(&self) -> bool {
        matches!(self, Semantics::GR | Semantics::ID)
    }
}

impl TryFrom<&str> for Semantics {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Semantics::iter()
            .find(|s| s.as_ref().eq_ignore_ascii_case(value))
            .ok_or_else(|| anyhow!(r#"undefined semantics "{}""#, value))
    }
}

/// The query to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum Query {
    /// Check credulous acceptance
    DC,
    /// Check skeptical acceptance
    DS,
    /// Compute a single extension
    SE,
    /// Enumerate the extensions
    EE,
}

impl Query {
    /// Returns `true` iff this query needs a target argument.
    pub fn requires_argument(&self) -> bool {
        matches!(self, Query::DC | Query::DS)
    }
}

impl TryFrom<&str> for Query {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Query::iter()
            .find(|q| q.as_ref().eq_ignore_ascii_case(value))
            .ok_or_else(|| anyhow!(r#"undefined query "{}""#, value))
    }
}

/// A problem handled by the solver.
///
/// Problems are either a query under a semantics (`DC-CO`, `EE-PR`, ...),
/// or the `D3` problem that computes the grounded, stable and preferred extensions at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// A query under a semantics.
    Query(Query, Semantics),
    /// The grounded/stable/preferred classification problem.
    D3,
}

impl Problem {
    /// Returns `true` iff this problem needs a target argument.
    pub fn requires_argument(&self) -> bool {
        match self {
            Problem::Query(q, _) => q.requires_argument(),
            Problem::D3 => false,
        }
    }

    fn is_supported(&self) -> bool {
        match self {
            Problem::Query(Query::EE, s) => !s.is_single_status(),
            _ => true,
        }
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Problem::Query(q, s) => write!(f, "{}-{}", q.as_ref(), s.as_ref()),
            Problem::D3 => write!(f, "D3"),
        }
    }
}

/// Reads a string depicting a problem with an XX-YY pattern, or the `D3` problem.
///
/// This functions reads a problem string following the format in ICCMA competitions.
/// The string is split at the first hyphen found in it.
/// The substring before this hyphen is considered as the query, while the substring after it is considered as the semantics.
///
/// In case there is no hyphen (and the string is not `D3`), an error is returned.
/// An error is also returned if the problem is well formed but not handled, like `EE-GR`.
pub fn read_problem_string(problem: &str) -> Result<Problem> {
    let context = || format!(r#"while parsing problem string "{}""#, problem);
    if problem.eq_ignore_ascii_case("D3") {
        return Ok(Problem::D3);
    }
    let p = match problem.find('-') {
        Some(n) => {
            let query = Query::try_from(&problem[0..n]).with_context(context)?;
            let semantics = Semantics::try_from(&problem[1 + n..]).with_context(context)?;
            Problem::Query(query, semantics)
        }
        None => return Err(anyhow!("no hyphen in problem string")).with_context(context),
    };
    if p.is_supported() {
        Ok(p)
    } else {
        Err(anyhow!("problem {} is not supported", p)).with_context(context)
    }
}

/// Iterates over the problems handled by the solver, in alphabetical order.
pub fn iter_problem_strings() -> impl Iterator<Item = String> {
    let mut problems = Query::iter()
        .flat_map(|q| Semantics::iter().map(move |s| Problem::Query(q, s)))
        .chain(std::iter::once(Problem::D3))
        .filter(|p| p.is_supported())
        .map(|p| p.to_string())
        .collect::<Vec<String>>();
    problems.sort_unstable();
    problems.into_iter()
}
