use super::{cli_manager, command::Command, common};
use anyhow::{anyhow, Context, Result};
use circabri::{
    aa::{read_problem_string, AAFramework, LabelType, Problem, Query, Semantics},
    circ::CircSolver,
    io::{Iccma17Writer, ResponseWriter},
    solvers::{
        CircSemanticsSolver, CredulousAcceptanceComputer, D3Solver, ExtensionEnumerator,
        GroundedSemanticsSolver, IdealSemanticsSolver, SingleExtensionComputer,
        SkepticalAcceptanceComputer,
    },
};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use log::{info, warn};

const CMD_NAME: &str = "solve";

pub(crate) struct SolveCommand;

impl SolveCommand {
    pub(crate) fn new() -> Self {
        SolveCommand
    }
}

impl<'a> Command<'a> for SolveCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Solves an argumentation framework problem")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .args(&common::problem_args())
            .arg(common::reader_arg())
            .args(&common::circ_solver_args())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let problem = read_problem_string(
            arg_matches
                .value_of(common::ARG_PROBLEM)
                .context("missing problem")?,
        )?;
        check_arg_definition(problem, arg_matches.value_of(common::ARG_ARG))?;
        let circ_solver = common::create_circ_solver(arg_matches)?;
        let file = arg_matches
            .value_of(common::ARG_INPUT)
            .context("missing input file")?;
        let mut reader = common::create_reader(arg_matches)?;
        let af = common::read_file_path(file, reader.as_mut())?;
        let arg = arg_matches
            .value_of(common::ARG_ARG)
            .filter(|_| problem.requires_argument())
            .map(|a| reader.read_arg_from_str(&af, a))
            .transpose()
            .context("while parsing the argument passed to the command line")?;
        info!("solving problem {}", problem);
        let writer = Iccma17Writer::default();
        let mut out = std::io::stdout();
        match (problem, arg) {
            (Problem::D3, _) => {
                let result = D3Solver::new(&af, &circ_solver).compute()?;
                writer.write_d3(
                    &mut out,
                    &result.grounded,
                    &result.stable,
                    &result.preferred,
                )
            }
            (Problem::Query(Query::SE, semantics), _) => {
                let mut solver = single_extension_computer(&af, &circ_solver, semantics)?;
                let ext = solver.compute_one_extension()?;
                writer.write_single_extension(&mut out, ext.as_deref())
            }
            (Problem::Query(Query::EE, semantics), _) => {
                let mut solver = CircSemanticsSolver::new(&af, &circ_solver, semantics)?;
                let extensions = solver.enumerate_extensions()?;
                info!("found {} extension(s)", extensions.len());
                writer.write_extensions(&mut out, &extensions)
            }
            (Problem::Query(Query::DC, semantics), Some(a)) => {
                let mut solver = credulous_acceptance_computer(&af, &circ_solver, semantics)?;
                let status = solver.is_credulously_accepted(a)?;
                <Iccma17Writer as ResponseWriter<String>>::write_acceptance_status(&writer, &mut out, status)
            }
            (Problem::Query(Query::DS, semantics), Some(a)) => {
                let mut solver = skeptical_acceptance_computer(&af, &circ_solver, semantics)?;
                let status = solver.is_skeptically_accepted(a)?;
                <Iccma17Writer as ResponseWriter<String>>::write_acceptance_status(&writer, &mut out, status)
            }
            (Problem::Query(q, _), None) => Err(anyhow!(
                "missing argument on the command line (required for query {})",
                q.as_ref()
            )),
        }
    }
}

fn check_arg_definition(problem: Problem, arg: Option<&str>) -> Result<()> {
    match (problem.requires_argument(), arg) {
        (true, None) => Err(anyhow!(
            "missing argument on the command line (required for problem {})",
            problem
        )),
        (false, Some(_)) => {
            warn!(
                "unexpected argument on the command line (useless for problem {})",
                problem
            );
            Ok(())
        }
        _ => Ok(()),
    }
}

fn single_extension_computer<'a, T>(
    af: &'a AAFramework<T>,
    circ_solver: &'a dyn CircSolver,
    semantics: Semantics,
) -> Result<Box<dyn SingleExtensionComputer<T> + 'a>>
where
    T: LabelType,
{
    match semantics {
        Semantics::GR => Ok(Box::new(GroundedSemanticsSolver::new(af, circ_solver))),
        Semantics::ID => Ok(Box::new(IdealSemanticsSolver::new(af, circ_solver))),
        _ => Ok(Box::new(CircSemanticsSolver::new(af, circ_solver, semantics)?)),
    }
}

fn credulous_acceptance_computer<'a, T>(
    af: &'a AAFramework<T>,
    circ_solver: &'a dyn CircSolver,
    semantics: Semantics,
) -> Result<Box<dyn CredulousAcceptanceComputer<T> + 'a>>
where
    T: LabelType,
{
    match semantics {
        Semantics::GR => Ok(Box::new(GroundedSemanticsSolver::new(af, circ_solver))),
        Semantics::ID => Ok(Box::new(IdealSemanticsSolver::new(af, circ_solver))),
        _ => Ok(Box::new(CircSemanticsSolver::new(af, circ_solver, semantics)?)),
    }
}

fn skeptical_acceptance_computer<'a, T>(
    af: &'a AAFramework<T>,
    circ_solver: &'a dyn CircSolver,
    semantics: Semantics,
) -> Result<Box<dyn SkepticalAcceptanceComputer<T> + 'a>>
where
    T: LabelType,
{
    match semantics {
        Semantics::GR => Ok(Box::new(GroundedSemanticsSolver::new(af, circ_solver))),
        Semantics::ID => Ok(Box::new(IdealSemanticsSolver::new(af, circ_solver))),
        _ => Ok(Box::new(CircSemanticsSolver::new(af, circ_solver, semantics)?)),
    }
}

