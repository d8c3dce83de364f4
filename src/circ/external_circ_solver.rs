use super::{
    circ_solver::{BufferedCircSolver, SolvingListener, SolvingResult},
    CcnfInstance, CircSolver, SolvingOptions,
};
use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use std::{
    io::{Read, Write},
    process::{Child, ChildStdout, Command, Stdio},
    thread::JoinHandle,
};

/// A circumscription solver which execution is made by a system command.
///
/// The system command is composed by an executable program, and a potential list of CLI arguments.
/// The flags derived from the [`SolvingOptions`] are appended to these arguments at each invocation.
///
/// The solver must read the ccnf instance from its standard input and write its models on its standard output.
pub struct ExternalCircSolver {
    buffered_solver: BufferedCircSolver,
}

impl ExternalCircSolver {
    /// Builds a new external circumscription solver.
    ///
    /// The `program` argument is the path to the software to execute.
    /// The `options` parameter is the CLI options to provide to the software under execution, before the solving flags.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use circabri::circ::{CcnfInstance, CircSolver, ExternalCircSolver, SolvingOptions};
    /// let solver = ExternalCircSolver::new("/home/me/circumscriptino".to_string(), vec![]);
    /// let instance = CcnfInstance::new(0);
    /// let result = solver.solve(&instance, SolvingOptions::single_model()).unwrap();
    /// assert!(result.is_satisfiable());
    /// ```
    pub fn new(program: String, options: Vec<String>) -> Self {
        Self {
            buffered_solver: BufferedCircSolver::new(Box::new(
                move |instance: String, flags: &[String]| -> Result<Box<dyn Read>> {
                    exec_solver(instance, &program, &options, flags)
                },
            )),
        }
    }
}

impl CircSolver for ExternalCircSolver {
    fn solve(&self, instance: &CcnfInstance, options: SolvingOptions) -> Result<SolvingResult> {
        self.buffered_solver.solve(instance, options)
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.buffered_solver.add_listener(listener)
    }
}

fn exec_solver(
    instance: String,
    program: &str,
    options: &[String],
    flags: &[String],
) -> Result<Box<dyn Read>> {
    let context = || format!(r#"while launching the solver "{}""#, program);
    let mut child = Command::new(program)
        .args(options)
        .args(flags)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .with_context(context)?;
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| anyhow!("cannot open the solver standard input"))
        .with_context(context)?;
    let writer = std::thread::spawn(move || {
        stdin.write_all(instance.as_bytes())?;
        stdin.flush()
    });
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("cannot open the solver standard output"))
        .with_context(context)?;
    Ok(Box::new(SolverProcessOutput {
        child,
        stdout,
        writer: Some(writer),
    }))
}

/// The standard output of a solver process.
///
/// When the end of the output is reached, the thread writing the instance is joined and the process is reaped.
struct SolverProcessOutput {
    child: Child,
    stdout: ChildStdout,
    writer: Option<JoinHandle<std::io::Result<()>>>,
}

impl SolverProcessOutput {
    fn terminate(&mut self) {
        if let Some(writer) = self.writer.take() {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("error while writing the instance to the solver: {}", e),
                Err(_) => warn!("the thread writing the instance to the solver panicked"),
            }
            match self.child.wait() {
                Ok(status) => debug!("solver process exited with {}", status),
                Err(e) => warn!("error while waiting for the solver process: {}", e),
            }
        }
    }
}

impl Read for SolverProcessOutput {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.stdout.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.terminate();
        }
        Ok(n)
    }
}

impl Drop for SolverProcessOutput {
    fn drop(&mut self) {
        if self.writer.is_some() {
            let _ = self.child.kill();
            self.terminate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circ::{Literal, Variable};

    fn get_echo_command(content: &str) -> Option<(String, Vec<String>)> {
        if cfg!(target_family = "unix") {
            Some((
                "sh".to_string(),
                vec!["-c".to_string(), format!("echo '{}'", content)],
            ))
        } else {
            None
        }
    }

    fn instance() -> CcnfInstance {
        let mut instance = CcnfInstance::new(2);
        instance.add_name(Variable::from(1usize), "a").unwrap();
        instance.add_name(Variable::from(2usize), "b").unwrap();
        instance
            .add_clause(vec![Literal::from(1), Literal::from(2)])
            .unwrap();
        instance
    }

    #[test]
    fn test_solve_output() {
        let (program, options) = match get_echo_command("v a b") {
            Some(cmd) => cmd,
            None => return,
        };
        let s = ExternalCircSolver::new(program, options);
        let model = s
            .solve(&instance(), SolvingOptions::single_model())
            .unwrap()
            .first_model()
            .unwrap();
        assert_eq!(2, model.len());
    }

    #[test]
    fn test_solve_unsat_output() {
        let (program, options) = match get_echo_command("UNSATISFIABLE") {
            Some(cmd) => cmd,
            None => return,
        };
        let s = ExternalCircSolver::new(program, options);
        assert!(!s
            .solve(&instance(), SolvingOptions::all_models())
            .unwrap()
            .is_satisfiable());
    }

    #[test]
    fn test_solve_missing_program() {
        let s = ExternalCircSolver::new("/this/solver/does/not/exist".to_string(), vec![]);
        assert!(s.solve(&instance(), SolvingOptions::single_model()).is_err());
    }

    #[test]
    fn test_solve_reads_stdin() {
        if !cfg!(target_family = "unix") {
            return;
        }
        let s = ExternalCircSolver::new(
            "sh".to_string(),
            vec![
                "-c".to_string(),
                "grep -q '^v 2 b$' && echo 'v b' || echo UNSATISFIABLE".to_string(),
            ],
        );
        let model = s
            .solve(&instance(), SolvingOptions::single_model())
            .unwrap()
            .first_model()
            .unwrap();
        assert!(model.contains(Variable::from(2usize)));
    }
}
