use super::{
    app_helper::AppHelper, command::Command, AuthorsCommand, CheckCommand, EncodeCommand,
    FormatsCommand, ProblemsCommand, SolveCommand,
};
use anyhow::{anyhow, Context, Result};
use circabri::{
    aa::{AAFramework, LabelType},
    circ::{CircSolver, ExternalCircSolver, SolvingListener, SolvingResult},
    io::{AspartixReader, InstanceReader, TgfReader},
};
use clap::{Arg, ArgMatches};
use log::{info, warn};
use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
};

pub(crate) const APP_NAME: &str = "circabri";

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        APP_NAME,
        app_version,
        authors,
        "Circabri, an abstract argumentation solver built on top of circumscription solvers.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(APP_NAME, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(EncodeCommand::new()),
        Box::new(FormatsCommand::new()),
        Box::new(ProblemsCommand::new()),
        Box::new(SolveCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the AF")
        .required(true)
}

pub(crate) const ARG_PROBLEM: &str = "PROBLEM";
pub(crate) const ARG_ARG: &str = "ARG";

pub(crate) fn problem_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_PROBLEM)
            .short("p")
            .empty_values(false)
            .multiple(false)
            .help("the problem to solve")
            .required(true),
        Arg::with_name(ARG_ARG)
            .short("a")
            .empty_values(false)
            .multiple(false)
            .help("the argument (for DC/DS queries)")
            .required(false),
    ]
}

pub(crate) const ARG_READER: &str = "READER";

/// The input formats, in the order they are displayed.
pub(crate) const INPUT_FORMATS: [&str; 2] = ["apx", "tgf"];

pub(crate) fn reader_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_READER)
        .short("r")
        .long("reader")
        .empty_values(false)
        .multiple(false)
        .possible_values(&INPUT_FORMATS)
        .default_value("apx")
        .help("the input file format")
        .required(false)
}

const ARG_CIRC_SOLVER: &str = "CIRC_SOLVER";
const ARG_CIRC_SOLVER_OPTIONS: &str = "CIRC_SOLVER_OPTIONS";

pub(crate) fn circ_solver_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_CIRC_SOLVER)
            .long("circ")
            .empty_values(false)
            .multiple(false)
            .help("a path to the circumscription solver")
            .required(true),
        Arg::with_name(ARG_CIRC_SOLVER_OPTIONS)
            .long("circ-opt")
            .requires(ARG_CIRC_SOLVER)
            .empty_values(false)
            .multiple(true)
            .number_of_values(1)
            .allow_hyphen_values(true)
            .help("an option to give to the circumscription solver")
            .required(false),
    ]
}

/// Builds the reader associated with the input format given on the command line.
pub(crate) fn create_reader(arg_matches: &ArgMatches<'_>) -> Result<Box<dyn InstanceReader<String>>> {
    match arg_matches.value_of(ARG_READER).unwrap_or("apx") {
        "apx" => Ok(Box::<AspartixReader>::default()),
        "tgf" => Ok(Box::<TgfReader>::default()),
        other => Err(anyhow!("unknown input format: {}", other)),
    }
}

pub(crate) fn read_file_path<T>(
    file_path: &str,
    reader: &mut dyn InstanceReader<T>,
) -> Result<AAFramework<T>>
where
    T: LabelType,
{
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!("while opening file {:?}", canonicalized))?,
    );
    let af = reader
        .read(&mut file_reader)
        .with_context(|| format!("while reading file {:?}", canonicalized))?;
    info!(
        "the argumentation framework has {} argument(s) and {} attack(s)",
        af.n_arguments(),
        af.n_attacks(),
    );
    Ok(af)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

#[cfg(unix)]
fn check_executable(path: &PathBuf) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata =
        fs::metadata(path).with_context(|| format!("while reading metadata of {:?}", path))?;
    if !metadata.is_file() || metadata.permissions().mode() & 0o111 == 0 {
        return Err(anyhow!("{:?} is not an executable file", path));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_executable(path: &PathBuf) -> Result<()> {
    if !path.is_file() {
        return Err(anyhow!("{:?} is not a file", path));
    }
    Ok(())
}

/// Builds the circumscription solver given on the command line.
///
/// The path to the solver is canonicalized and checked before any instance is sent to it.
pub(crate) fn create_circ_solver(arg_matches: &ArgMatches<'_>) -> Result<ExternalCircSolver> {
    let context = "while checking the circumscription solver";
    let path_str = arg_matches
        .value_of(ARG_CIRC_SOLVER)
        .ok_or_else(|| anyhow!("missing path to the circumscription solver"))?;
    let path = canonicalize_file_path(path_str).context(context)?;
    check_executable(&path).context(context)?;
    let options = arg_matches
        .values_of(ARG_CIRC_SOLVER_OPTIONS)
        .map(|v| v.map(|o| o.to_string()).collect::<Vec<String>>())
        .unwrap_or_default();
    info!("using {:?} as circumscription solver", path);
    let mut solver = ExternalCircSolver::new(path.to_string_lossy().to_string(), options);
    solver.add_listener(Box::<CircSolvingLogger>::default());
    Ok(solver)
}

#[derive(Default)]
struct CircSolvingLogger;

impl SolvingListener for CircSolvingLogger {
    fn solving_start(&self, n_vars: usize, n_clauses: usize, flags: &[String]) {
        info!(
            "launching the circumscription solver on an instance with {} variables and {} clauses (flags: {})",
            n_vars,
            n_clauses,
            flags.join(" ")
        );
    }

    fn solving_end(&self, result: &SolvingResult) {
        match result {
            SolvingResult::Satisfiable(models) => {
                info!("the solver returned {} model(s)", models.len())
            }
            SolvingResult::Unsatisfiable => info!("the solver returned UNSATISFIABLE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::App;

    fn matches(args: &[&str]) -> ArgMatches<'static> {
        App::new("test")
            .arg(reader_arg())
            .args(&circ_solver_args())
            .get_matches_from_safe(args.iter())
            .unwrap()
    }

    #[test]
    fn test_create_reader() {
        assert!(create_reader(&matches(&["test", "--circ", "foo"])).is_ok());
        assert!(create_reader(&matches(&["test", "--circ", "foo", "--reader", "tgf"])).is_ok());
    }

    #[test]
    fn test_missing_circ_solver() {
        assert!(create_circ_solver(&matches(&["test", "--circ", "/this/does/not/exist"])).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_circ_solver_must_be_executable() {
        assert!(create_circ_solver(&matches(&["test", "--circ", "/"])).is_err());
        assert!(create_circ_solver(&matches(&["test", "--circ", "/bin/sh"])).is_ok());
    }

    #[test]
    fn test_circ_solver_options() {
        let m = matches(&["test", "--circ", "foo", "--circ-opt", "-v", "--circ-opt", "x"]);
        assert_eq!(
            vec!["-v", "x"],
            m.values_of(ARG_CIRC_SOLVER_OPTIONS)
                .unwrap()
                .collect::<Vec<&str>>()
        );
    }
}
