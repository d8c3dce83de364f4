use super::{BufferedCircSolver, SolvingFn};
use anyhow::{anyhow, Context, Result};
use std::io::Read;

/// Builds a circumscription solver that computes the models of small instances by enumerating all the assignments.
///
/// The solver reads the ccnf format and honors the `-n` and `--circ-wit` flags.
pub(crate) fn brute_force_solver() -> BufferedCircSolver {
    BufferedCircSolver::new(brute_force_solving_fn())
}

pub(crate) fn brute_force_solving_fn() -> Box<SolvingFn> {
    Box::new(
        |instance: String, flags: &[String]| -> Result<Box<dyn Read>> {
            let output = solve(&instance, flags)?;
            Ok(Box::new(std::io::Cursor::new(output)))
        },
    )
}

struct ParsedInstance {
    maximize: bool,
    objective: Vec<isize>,
    names: Vec<(usize, String)>,
    clauses: Vec<Vec<isize>>,
    n_vars: usize,
}

fn parse(instance: &str) -> Result<ParsedInstance> {
    let mut parsed = ParsedInstance {
        maximize: false,
        objective: vec![],
        names: vec![],
        clauses: vec![],
        n_vars: 0,
    };
    let read_lits = |words: &[&str]| -> Result<Vec<isize>> {
        let lits = words
            .iter()
            .map(|w| w.parse::<isize>().context("not a literal"))
            .collect::<Result<Vec<isize>>>()?;
        match lits.last() {
            Some(0) => Ok(lits[..lits.len() - 1].to_vec()),
            _ => Err(anyhow!("missing terminal 0")),
        }
    };
    for line in instance.lines() {
        let words = line.split_whitespace().collect::<Vec<&str>>();
        match words.first() {
            Some(&"p") => parsed.maximize = words[2] == "+",
            Some(&"o") => parsed.objective = read_lits(&words[1..])?,
            Some(&"v") => parsed
                .names
                .push((words[1].parse::<usize>()?, words[2].to_string())),
            Some(_) => parsed.clauses.push(read_lits(&words)?),
            None => {}
        }
    }
    parsed.n_vars = parsed
        .clauses
        .iter()
        .flatten()
        .chain(parsed.objective.iter())
        .map(|l| l.unsigned_abs())
        .chain(parsed.names.iter().map(|(v, _)| *v))
        .max()
        .unwrap_or(0);
    Ok(parsed)
}

fn is_true(assignment: usize, lit: isize) -> bool {
    let value = assignment & (1 << (lit.unsigned_abs() - 1)) != 0;
    value == (lit > 0)
}

fn solve(instance: &str, flags: &[String]) -> Result<String> {
    let all_models = flags.iter().any(|f| f == "-n=0");
    let one_witness = flags.iter().any(|f| f == "--circ-wit=1");
    let parsed = parse(instance)?;
    let models = (0..(1usize << parsed.n_vars))
        .filter(|a| {
            parsed
                .clauses
                .iter()
                .all(|cl| cl.iter().any(|l| is_true(*a, *l)))
        })
        .collect::<Vec<usize>>();
    let objective_mask = |a: usize| -> Vec<bool> {
        parsed.objective.iter().map(|l| is_true(a, *l)).collect()
    };
    let is_strict_subset = |small: &[bool], big: &[bool]| {
        small.iter().zip(big.iter()).all(|(s, b)| !s || *b) && small != big
    };
    let mut selected: Vec<usize> = vec![];
    let mut selected_masks: Vec<Vec<bool>> = vec![];
    for a in models.iter() {
        let mask = objective_mask(*a);
        let dominated = models.iter().any(|b| {
            let other = objective_mask(*b);
            if parsed.maximize {
                is_strict_subset(&mask, &other)
            } else {
                is_strict_subset(&other, &mask)
            }
        });
        if dominated || (one_witness && selected_masks.contains(&mask)) {
            continue;
        }
        selected.push(*a);
        selected_masks.push(mask);
    }
    if selected.is_empty() {
        return Ok("UNSATISFIABLE\n".to_string());
    }
    let n_output = if all_models { selected.len() } else { 1 };
    let mut output = String::new();
    for a in selected.into_iter().take(n_output) {
        output.push('v');
        for (v, name) in parsed.names.iter() {
            if is_true(a, *v as isize) {
                output.push(' ');
                output.push_str(name);
            }
        }
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(n: usize, wit: usize) -> Vec<String> {
        vec![
            "--mode=circumscription".to_string(),
            format!("-n={}", n),
            format!("--circ-wit={}", wit),
        ]
    }

    #[test]
    fn test_unsat() {
        let instance = "p ccnf -\no 0\nv 1 a\n1 0\n-1 0\n";
        assert_eq!("UNSATISFIABLE\n", solve(instance, &flags(0, 0)).unwrap());
    }

    #[test]
    fn test_all_models() {
        let instance = "p ccnf -\no 0\nv 1 a\nv 2 b\n-1 -2 0\n";
        assert_eq!("v\nv a\nv b\n", solve(instance, &flags(0, 0)).unwrap());
        assert_eq!("v\n", solve(instance, &flags(1, 1)).unwrap());
    }

    #[test]
    fn test_maximize() {
        let instance = "p ccnf +\no 1 2 0\nv 1 a\nv 2 b\n-1 -2 0\n";
        assert_eq!("v a\nv b\n", solve(instance, &flags(0, 1)).unwrap());
    }

    #[test]
    fn test_minimize() {
        let instance = "p ccnf -\no 1 2 0\nv 1 a\nv 2 b\n1 2 0\n";
        assert_eq!("v a\nv b\n", solve(instance, &flags(0, 1)).unwrap());
    }

    #[test]
    fn test_witnesses() {
        let instance = "p ccnf +\no 1 0\nv 1 a\nv 2 b\n1 0\n";
        assert_eq!("v a\nv a b\n", solve(instance, &flags(0, 0)).unwrap());
        assert_eq!("v a\n", solve(instance, &flags(0, 1)).unwrap());
    }
}
