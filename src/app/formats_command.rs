use super::{cli_manager, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};

const CMD_NAME: &str = "formats";

pub(crate) struct FormatsCommand;

impl FormatsCommand {
    pub(crate) fn new() -> Self {
        FormatsCommand
    }
}

impl<'a> Command<'a> for FormatsCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Displays the input formats handled by the solver")
            .setting(AppSettings::DisableVersion)
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, _arg_matches: &ArgMatches<'_>) -> Result<()> {
        println!("[{}]", common::INPUT_FORMATS.join(","));
        Ok(())
    }
}
