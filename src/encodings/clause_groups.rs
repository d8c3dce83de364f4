use super::VarAllocator;
use crate::{
    aa::{AAFramework, LabelType},
    circ::{CcnfInstance, Literal},
};
use anyhow::Result;

/// The groups of clauses the semantics encodings are made of.
///
/// For an argument `a`, `x_a` denotes its truth variable, `att_a` its attacked variable and `r_a` its range variable
/// (see [`VarAllocator`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseGroup {
    /// `¬x_a ∨ ¬x_b` for each attack from `a` to `b`.
    ConflictFreeness,
    /// `att_b ↔ (x_c1 ∨ ... ∨ x_ck)` for each argument `b` attacked by the `c_i`.
    AttackActivation,
    /// `¬x_b ∨ att_c` for each attack from `c` to `b`.
    Admissibility,
    /// `x_a ∨ ¬att_b1 ∨ ... ∨ ¬att_bk` for each argument `a` attacked by the `b_i`.
    Completeness,
    /// `x_a ∨ x_b1 ∨ ... ∨ x_bk` for each argument `a` attacked by the `b_i`.
    Stability,
    /// `r_a ↔ (x_a ∨ x_b1 ∨ ... ∨ x_bk)` for each argument `a` attacked by the `b_i`.
    Range,
}

impl ClauseGroup {
    /// Adds the clauses of this group to the instance.
    pub fn encode<T>(
        &self,
        af: &AAFramework<T>,
        vars: &VarAllocator,
        instance: &mut CcnfInstance,
    ) -> Result<()>
    where
        T: LabelType,
    {
        match self {
            ClauseGroup::ConflictFreeness => encode_conflict_freeness(af, vars, instance),
            ClauseGroup::AttackActivation => encode_attack_activation(af, vars, instance),
            ClauseGroup::Admissibility => encode_admissibility(af, vars, instance),
            ClauseGroup::Completeness => encode_completeness(af, vars, instance),
            ClauseGroup::Stability => encode_stability(af, vars, instance),
            ClauseGroup::Range => encode_range(af, vars, instance),
        }
    }
}

fn encode_conflict_freeness<T>(
    af: &AAFramework<T>,
    vars: &VarAllocator,
    instance: &mut CcnfInstance,
) -> Result<()>
where
    T: LabelType,
{
    af.iter_attacks().try_for_each(|att| {
        instance.add_clause(vec![
            vars.truth_var(att.attacker()).negative(),
            vars.truth_var(att.attacked()).negative(),
        ])
    })
}

fn encode_attack_activation<T>(
    af: &AAFramework<T>,
    vars: &VarAllocator,
    instance: &mut CcnfInstance,
) -> Result<()>
where
    T: LabelType,
{
    for arg in af.argument_set().iter() {
        let attacked_var = vars.attacked_var(arg);
        let mut full_cl = vec![attacked_var.negative()];
        for att in af.iter_attacks_to(arg) {
            let attacker_var = vars.truth_var(att.attacker());
            instance.add_clause(vec![attacker_var.negative(), attacked_var.positive()])?;
            full_cl.push(attacker_var.positive());
        }
        instance.add_clause(full_cl)?;
    }
    Ok(())
}

fn encode_admissibility<T>(
    af: &AAFramework<T>,
    vars: &VarAllocator,
    instance: &mut CcnfInstance,
) -> Result<()>
where
    T: LabelType,
{
    af.iter_attacks().try_for_each(|att| {
        instance.add_clause(vec![
            vars.truth_var(att.attacked()).negative(),
            vars.attacked_var(att.attacker()).positive(),
        ])
    })
}

fn encode_completeness<T>(
    af: &AAFramework<T>,
    vars: &VarAllocator,
    instance: &mut CcnfInstance,
) -> Result<()>
where
    T: LabelType,
{
    af.argument_set().iter().try_for_each(|arg| {
        let cl = std::iter::once(vars.truth_var(arg).positive())
            .chain(
                af.iter_attacks_to(arg)
                    .map(|att| vars.attacked_var(att.attacker()).negative()),
            )
            .collect::<Vec<Literal>>();
        instance.add_clause(cl)
    })
}

fn encode_stability<T>(
    af: &AAFramework<T>,
    vars: &VarAllocator,
    instance: &mut CcnfInstance,
) -> Result<()>
where
    T: LabelType,
{
    af.argument_set().iter().try_for_each(|arg| {
        let cl = std::iter::once(vars.truth_var(arg).positive())
            .chain(
                af.iter_attacks_to(arg)
                    .map(|att| vars.truth_var(att.attacker()).positive()),
            )
            .collect::<Vec<Literal>>();
        instance.add_clause(cl)
    })
}

fn encode_range<T>(
    af: &AAFramework<T>,
    vars: &VarAllocator,
    instance: &mut CcnfInstance,
) -> Result<()>
where
    T: LabelType,
{
    for arg in af.argument_set().iter() {
        let range_var = vars.range_var(arg);
        let arg_var = vars.truth_var(arg);
        instance.add_clause(vec![arg_var.negative(), range_var.positive()])?;
        let mut full_cl = vec![range_var.negative(), arg_var.positive()];
        for att in af.iter_attacks_to(arg) {
            let attacker_var = vars.truth_var(att.attacker());
            instance.add_clause(vec![attacker_var.negative(), range_var.positive()])?;
            full_cl.push(attacker_var.positive());
        }
        instance.add_clause(full_cl)?;
    }
    Ok(())
}
