use super::{ClauseGroup, VarAllocator};
use crate::{
    aa::{AAFramework, LabelType, Semantics},
    circ::{CcnfInstance, Literal, ObjectiveSense},
};
use anyhow::{anyhow, Context, Result};

/// The encodings of the semantics into circumscription problems.
///
/// Each encoding is made of a list of clause groups and a default objective.
/// The models of the encoding, after circumscription, correspond to the extensions of the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticsEncoding {
    /// The complete semantics.
    Complete,
    /// The stable semantics.
    Stable,
    /// The preferred semantics (maximal complete extensions).
    Preferred,
    /// The grounded semantics (the minimal complete extension).
    Grounded,
    /// The semi-stable semantics (complete extensions with a maximal range).
    SemiStable,
    /// The stage semantics (conflict-free sets with a maximal range).
    Stage,
    /// The maximal admissible sets.
    Admissible,
}

impl TryFrom<Semantics> for SemanticsEncoding {
    type Error = anyhow::Error;

    fn try_from(value: Semantics) -> Result<Self, Self::Error> {
        match value {
            Semantics::CO => Ok(SemanticsEncoding::Complete),
            Semantics::PR => Ok(SemanticsEncoding::Preferred),
            Semantics::ST => Ok(SemanticsEncoding::Stable),
            Semantics::SST => Ok(SemanticsEncoding::SemiStable),
            Semantics::STG => Ok(SemanticsEncoding::Stage),
            Semantics::GR => Ok(SemanticsEncoding::Grounded),
            Semantics::ID => Err(anyhow!(
                "the ideal semantics cannot be encoded by a single circumscription problem"
            )),
        }
    }
}

const COMPLETE_GROUPS: [ClauseGroup; 4] = [
    ClauseGroup::ConflictFreeness,
    ClauseGroup::AttackActivation,
    ClauseGroup::Admissibility,
    ClauseGroup::Completeness,
];

impl SemanticsEncoding {
    /// Returns the clause groups of this encoding, in the order they are written.
    pub fn clause_groups(&self) -> Vec<ClauseGroup> {
        match self {
            SemanticsEncoding::Complete
            | SemanticsEncoding::Preferred
            | SemanticsEncoding::Grounded => COMPLETE_GROUPS.to_vec(),
            SemanticsEncoding::Stable => {
                let mut groups = COMPLETE_GROUPS.to_vec();
                groups.push(ClauseGroup::Stability);
                groups
            }
            SemanticsEncoding::SemiStable => {
                let mut groups = COMPLETE_GROUPS.to_vec();
                groups.push(ClauseGroup::Range);
                groups
            }
            SemanticsEncoding::Stage => vec![ClauseGroup::ConflictFreeness, ClauseGroup::Range],
            SemanticsEncoding::Admissible => vec![
                ClauseGroup::ConflictFreeness,
                ClauseGroup::AttackActivation,
                ClauseGroup::Admissibility,
            ],
        }
    }

    fn default_objective<T>(
        &self,
        af: &AAFramework<T>,
        vars: &VarAllocator,
    ) -> (ObjectiveSense, Vec<Literal>)
    where
        T: LabelType,
    {
        let truth_lits = || -> Vec<Literal> {
            af.argument_set()
                .iter()
                .map(|a| vars.truth_var(a).positive())
                .collect()
        };
        let range_lits = || -> Vec<Literal> {
            af.argument_set()
                .iter()
                .map(|a| vars.range_var(a).positive())
                .collect()
        };
        match self {
            SemanticsEncoding::Complete | SemanticsEncoding::Stable => {
                (ObjectiveSense::Minimize, vec![])
            }
            SemanticsEncoding::Preferred | SemanticsEncoding::Admissible => {
                (ObjectiveSense::Maximize, truth_lits())
            }
            SemanticsEncoding::Grounded => (ObjectiveSense::Minimize, truth_lits()),
            SemanticsEncoding::SemiStable | SemanticsEncoding::Stage => {
                (ObjectiveSense::Maximize, range_lits())
            }
        }
    }

    /// Encodes a framework into a new ccnf instance.
    ///
    /// The instance contains the objective, the name table that maps the truth variables to the argument labels,
    /// and the clauses of the groups of this encoding.
    /// Its variables are the ones given by a [`VarAllocator`] built on the same framework.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::{AAFramework, ArgumentSet};
    /// # use circabri::encodings::SemanticsEncoding;
    /// let mut af = AAFramework::new_with_argument_set(ArgumentSet::new_with_labels(&["a", "b"]));
    /// af.new_attack(&"a", &"b").unwrap();
    /// let instance = SemanticsEncoding::Stable.encode(&af).unwrap();
    /// assert!(instance.to_string().starts_with("p ccnf -\no 0\nv 1 a\nv 2 b\n"));
    /// ```
    pub fn encode<T>(&self, af: &AAFramework<T>) -> Result<CcnfInstance>
    where
        T: LabelType,
    {
        let context = || format!("while encoding the {:?} semantics", self);
        let vars = VarAllocator::new(af);
        let mut instance = CcnfInstance::new(vars.max_var());
        let (sense, objective) = self.default_objective(af, &vars);
        instance
            .set_objective(sense, objective)
            .with_context(context)?;
        for arg in af.argument_set().iter() {
            instance
                .add_name(vars.truth_var(arg), &arg.label().to_string())
                .with_context(context)?;
        }
        for group in self.clause_groups() {
            group
                .encode(af, &vars, &mut instance)
                .with_context(context)?;
        }
        Ok(instance)
    }
}
