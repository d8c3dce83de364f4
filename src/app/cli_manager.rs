// crusti_app_helper
// Copyright (C) 2020  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::{app_helper::init_logger_with_level, command::Command, writable_string::WritableString};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches};
use log::{info, LevelFilter};
use std::{ffi::OsString, str::FromStr};
use sysinfo::System;

/// A structure used to handle the set of commands and to process the CLI arguments against them.
pub(crate) struct CliManager<'a> {
    app_name: &'a str,
    version: &'a str,
    author: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

pub(crate) const APP_HELPER_LOGGING_LEVEL_ARG: &str = "APP_HELPER_LOGGING_LEVEL_ARG";

const LOGGING_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// The CLI argument used to set the logging level, with `info` as default value.
pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    logging_level_cli_arg_with_default_value("info")
}

/// The CLI argument used to set the logging level.
pub(crate) fn logging_level_cli_arg_with_default_value<'a>(default_value: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(APP_HELPER_LOGGING_LEVEL_ARG)
        .long("logging-level")
        .multiple(false)
        .default_value(default_value)
        .possible_values(&LOGGING_LEVELS)
        .help("set the minimal logging level")
}

fn logging_level(matches: &ArgMatches<'_>) -> Result<LevelFilter> {
    match matches.value_of(APP_HELPER_LOGGING_LEVEL_ARG) {
        Some(l) => LevelFilter::from_str(l).context("while reading the logging level"),
        None => Ok(LevelFilter::Info),
    }
}

impl<'a> CliManager<'a> {
    pub fn new(app_name: &'a str, version: &'a str, author: &'a str, about: &'a str) -> Self {
        CliManager {
            app_name,
            version,
            author,
            about,
            commands: vec![],
        }
    }

    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    fn clap_app(&self) -> App<'a, 'a> {
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::NeedsSubcommandHelp)
            .setting(AppSettings::SubcommandRequired)
            .version(self.version)
            .author(self.author)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        app
    }

    pub fn parse_cli<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.into()).collect();
        match self.clap_app().get_matches_from_safe(args.clone()) {
            Ok(matches) => {
                let (name, sub_matches) = matches.subcommand();
                let command = self
                    .commands
                    .iter()
                    .find(|c| c.name() == name)
                    .ok_or_else(|| anyhow!("no such command: {}", name))?;
                let sub_matches =
                    sub_matches.ok_or_else(|| anyhow!("missing arguments for command {}", name))?;
                init_logger_with_level(logging_level(sub_matches)?);
                info!("{} {}", self.app_name, self.version);
                sys_info();
                command.execute(sub_matches)
            }
            Err(clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                ..
            }) => {
                init_logger_with_level(LevelFilter::Info);
                self.print_help(&args)
            }
            Err(e) => {
                init_logger_with_level(LevelFilter::Info);
                info!("{} {}", self.app_name, self.version);
                Err(anyhow!("{}", e.message))
            }
        }
    }

    fn print_help(&self, args: &[OsString]) -> Result<()> {
        const HELP_STRINGS: [&str; 3] = ["help", "-h", "--help"];
        let str_args = args
            .iter()
            .skip(1)
            .map(|a| a.to_string_lossy().to_string())
            .collect::<Vec<String>>();
        let subcommand = match str_args.as_slice() {
            [first, ..] if !HELP_STRINGS.contains(&first.as_str()) => Some(first),
            [first, second, ..] if HELP_STRINGS.contains(&first.as_str()) => Some(second),
            _ => None,
        }
        .and_then(|name| self.commands.iter().find(|c| c.name() == name.as_str()));
        let mut message = WritableString::default();
        let context = "while writing the help message";
        match subcommand {
            Some(c) => c.clap_subcommand().write_long_help(&mut message),
            None => self.clap_app().write_long_help(&mut message),
        }
        .map_err(|e| anyhow!("{}", e.message))
        .context(context)?;
        message.to_string().split('\n').for_each(|s| info!("{}", s));
        info!("");
        Ok(())
    }
}

fn sys_info() {
    info!("----------------------------------------");
    let sys = System::new_all();
    let unknown = || "[unknown]".to_string();
    info!("running on {}", System::host_name().unwrap_or_else(unknown));
    info!(
        "OS is {} {} with kernel {}",
        System::name().unwrap_or_else(unknown),
        System::os_version().unwrap_or_else(unknown),
        System::kernel_version().unwrap_or_else(unknown)
    );
    let mut cpu_kinds: Vec<&str> = sys.cpus().iter().map(|p| p.brand()).collect();
    cpu_kinds.sort_unstable();
    cpu_kinds.dedup();
    info!(
        "physical core count: {} {:?}",
        sys.physical_core_count()
            .map_or_else(unknown, |n| n.to_string()),
        cpu_kinds
    );
    info!("total memory: {} KB", sys.total_memory() >> 10);
    info!("----------------------------------------");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::SubCommand;
    use std::{cell::RefCell, rc::Rc};

    struct LocalCommand {
        command_involved: Rc<RefCell<bool>>,
        argument_set: Rc<RefCell<bool>>,
    }

    impl<'a> Command<'a> for LocalCommand {
        fn name(&self) -> &str {
            "local_command_name"
        }

        fn clap_subcommand(&self) -> App<'a, 'a> {
            SubCommand::with_name("local_command_name")
                .about("local_command_about")
                .arg(Arg::with_name("arg_name").short("a"))
                .arg(logging_level_cli_arg())
        }

        fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
            *self.command_involved.borrow_mut() = true;
            if arg_matches.is_present("arg_name") {
                *self.argument_set.borrow_mut() = true;
            }
            Ok(())
        }
    }

    fn run(args: Vec<&'static str>) -> Result<(bool, bool)> {
        let mut manager = CliManager::new("app_name", "app_version", "author", "about");
        let command_involved = Rc::new(RefCell::new(false));
        let argument_set = Rc::new(RefCell::new(false));
        manager.add_command(Box::new(LocalCommand {
            command_involved: Rc::clone(&command_involved),
            argument_set: Rc::clone(&argument_set),
        }));
        manager.parse_cli(args)?;
        let result = (*command_involved.borrow(), *argument_set.borrow());
        Ok(result)
    }

    #[test]
    fn test_command_involved() {
        assert_eq!((true, false), run(vec!["app_name", "local_command_name"]).unwrap());
    }

    #[test]
    fn test_command_and_arg_involved() {
        assert_eq!(
            (true, true),
            run(vec!["app_name", "local_command_name", "-a"]).unwrap()
        );
    }

    #[test]
    fn test_logging_level() {
        assert_eq!(
            (true, false),
            run(vec!["app_name", "local_command_name", "--logging-level", "off"]).unwrap()
        );
        assert!(run(vec!["app_name", "local_command_name", "--logging-level", "foo"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        assert!(run(vec!["app_name"]).is_err());
    }

    #[test]
    fn test_wrong_subcommand() {
        assert!(run(vec!["app_name", "foo"]).is_err());
    }

    #[test]
    fn test_wrong_arg() {
        assert!(run(vec!["app_name", "local_command_name", "-b"]).is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!((false, false), run(vec!["app_name", "-h"]).unwrap());
        assert_eq!((false, false), run(vec!["app_name", "help"]).unwrap());
        assert_eq!(
            (false, false),
            run(vec!["app_name", "help", "local_command_name"]).unwrap()
        );
        assert_eq!(
            (false, false),
            run(vec!["app_name", "local_command_name", "-h"]).unwrap()
        );
    }
}
