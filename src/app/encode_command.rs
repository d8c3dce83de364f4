use super::{cli_manager, command::Command, common};
use anyhow::{Context, Result};
use circabri::{
    aa::Semantics,
    encodings::{SemanticsEncoding, VarAllocator},
};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use std::io::Write;

const CMD_NAME: &str = "encode";

const ARG_SEM: &str = "ARG_SEM";

pub(crate) struct EncodeCommand;

impl EncodeCommand {
    pub(crate) fn new() -> Self {
        EncodeCommand
    }
}

impl<'a> Command<'a> for EncodeCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Writes the circumscription encoding of an argumentation framework")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(common::reader_arg())
            .arg(
                Arg::with_name(ARG_SEM)
                    .short("s")
                    .long("semantics")
                    .empty_values(false)
                    .multiple(false)
                    .possible_values(&["CO", "PR", "ST", "SST", "STG", "GR"])
                    .case_insensitive(true)
                    .help("the semantics to encode")
                    .required(true),
            )
            .arg(
                Arg::with_name(common::ARG_ARG)
                    .short("a")
                    .empty_values(false)
                    .multiple(false)
                    .help("an argument to add as query")
                    .required(false),
            )
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let semantics = Semantics::try_from(
            arg_matches
                .value_of(ARG_SEM)
                .context("missing semantics")?,
        )?;
        let encoding = SemanticsEncoding::try_from(semantics)?;
        let file = arg_matches
            .value_of(common::ARG_INPUT)
            .context("missing input file")?;
        let mut reader = common::create_reader(arg_matches)?;
        let af = common::read_file_path(file, reader.as_mut())?;
        let mut instance = encoding.encode(&af)?;
        if let Some(a) = arg_matches.value_of(common::ARG_ARG) {
            let arg = reader
                .read_arg_from_str(&af, a)
                .context("while parsing the argument passed to the command line")?;
            instance.set_query(VarAllocator::new(&af).truth_var(arg).positive())?;
        }
        info!(
            "the encoding has {} variables and {} clauses",
            instance.n_vars(),
            instance.n_clauses()
        );
        let context = "while writing the encoding";
        let mut out = std::io::stdout();
        instance.write_to(&mut out).context(context)?;
        out.flush().context(context)
    }
}
