use std::{ffi::OsString, path::PathBuf};

mod app;

const COMMON_ARGS: [&str; 2] = ["--logging-level", "off"];

const DEFAULT_CIRC_SOLVER_NAME: &str = "circumscriptino";

fn main() {
    let app = app::common::create_app_helper();
    let program = std::env::args_os()
        .next()
        .unwrap_or_else(|| app::common::APP_NAME.into());
    let real_args = std::env::args_os().skip(1).collect::<Vec<OsString>>();
    let default_solver = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join(DEFAULT_CIRC_SOLVER_NAME)));
    let fake_params = std::iter::once(program)
        .chain(translate_args(real_args, default_solver))
        .collect::<Vec<OsString>>();
    app.launch_app_with_args(fake_params);
}

/// Translates the arguments of the ICCMA 2017 interface into the ones of the `solve` command.
///
/// No arguments displays the authors, `--problems` and `--formats` display the supported problems and formats.
/// Otherwise, `-fo` is replaced by `--reader`, the logging is disabled unless a level is given,
/// and the default circumscription solver is used unless `--circ` is given.
fn translate_args(real_args: Vec<OsString>, default_solver: Option<PathBuf>) -> Vec<OsString> {
    let with_common_args = |command: &str| -> Vec<OsString> {
        std::iter::once(command)
            .chain(COMMON_ARGS.iter().copied())
            .map(OsString::from)
            .collect()
    };
    if real_args.is_empty() {
        return with_common_args("authors");
    }
    if real_args == ["--problems"] {
        return with_common_args("problems");
    }
    if real_args == ["--formats"] {
        return with_common_args("formats");
    }
    let has_arg = |name: &str| {
        real_args.iter().any(|a| {
            let a = a.to_string_lossy();
            a == name || a.starts_with(&format!("{}=", name))
        })
    };
    let mut new_args: Vec<OsString> = vec!["solve".into()];
    if !has_arg("--logging-level") {
        new_args.extend(COMMON_ARGS.iter().map(OsString::from));
    }
    if !has_arg("--circ") {
        if let Some(path) = default_solver {
            new_args.push("--circ".into());
            new_args.push(path.into_os_string());
        }
    }
    new_args.extend(real_args.into_iter().map(|a| {
        if a == "-fo" {
            "--reader".into()
        } else {
            a
        }
    }));
    new_args
}
