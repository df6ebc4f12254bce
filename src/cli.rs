// Command-line front end: argument definitions and the two command handlers.
// Handlers write to any `Write` so the output can be checked without a
// terminal.

use std::ffi::OsString;
use std::io::Write;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::api::ApiClient;
use crate::model::StatusList;

#[derive(Parser, Debug)]
#[command(
    name = "phatik",
    version,
    about = "Push and pull data from a Phatik server",
    disable_help_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue, help = "show this help message and exit")]
    pub help: bool,

    #[arg(short = 'v', long, global = true, help = "Print verbose messages")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// post a status to Phatik
    Post(PostArgs),
    /// list recent statuses from the backend
    List(ListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EndpointArgs {
    #[arg(long, env = "PHATIK_ENDPOINT", help = "the server url to connect to")]
    pub endpoint: String,
}

#[derive(Args, Debug, Clone)]
pub struct PostArgs {
    #[command(flatten)]
    pub endpoint: EndpointArgs,

    #[arg(help = "the message to post")]
    pub message: String,

    #[arg(help = "the source application")]
    pub app: String,

    #[arg(help = "tags to attach to the status")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub endpoint: EndpointArgs,

    #[arg(
        long = "min-id",
        allow_negative_numbers = true,
        help = "lowest id to fetch for incremental queries"
    )]
    pub min_id: Option<i64>,

    #[arg(
        long,
        allow_negative_numbers = true,
        help = "number of messages to fetch"
    )]
    pub count: Option<i64>,

    #[arg(short = 'f', long, value_enum, default_value_t = Format::Json, help = "format of output")]
    pub format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Raw,
}

/// Top-level help followed by the usage line of each command.
pub fn full_help() -> String {
    let mut cmd = Cli::command();
    cmd.build();

    let mut text = cmd.render_help().to_string();
    text.push('\n');
    for sub in cmd.get_subcommands_mut() {
        text.push_str(&format!("Command '{}'\n", sub.get_name()));
        text.push_str(&sub.render_usage().to_string());
        text.push_str("\n\n");
    }
    text
}

/// Text printed for a fetched page.
pub fn render(list: &StatusList, format: Format) -> Result<String> {
    match format {
        Format::Raw => Ok(format!("{list:?}")),
        Format::Json => serde_json::to_string(list).context("when converting to json"),
    }
}

/// What the command line asks for once parsed.
#[derive(Debug)]
pub enum CommandLineArgs {
    /// Top-level `-h/--help`: print [`full_help`] and nothing else.
    FullHelp,
    Run { verbose: bool, command: Command },
}

impl CommandLineArgs {
    pub fn try_parse_from<I, T>(itr: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = itr.into_iter().map(Into::into).collect();
        // The top-level help wins over whatever follows it, even an
        // incomplete command.
        if asks_for_full_help(&args) {
            return Ok(CommandLineArgs::FullHelp);
        }

        let cli = Cli::try_parse_from(args)?;
        if cli.help {
            return Ok(CommandLineArgs::FullHelp);
        }
        match cli.command {
            Some(command) => Ok(CommandLineArgs::Run {
                verbose: cli.verbose,
                command,
            }),
            None => Err(Cli::command()
                .error(ErrorKind::MissingSubcommand, "a command is required")),
        }
    }

    pub fn verbose(&self) -> bool {
        matches!(self, CommandLineArgs::Run { verbose: true, .. })
    }
}

// Top-level flags take no values, so the first bare word is the command name.
fn asks_for_full_help(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .map(|arg| arg.to_string_lossy())
        .take_while(|arg| arg.starts_with('-'))
        .any(|arg| arg == "--help" || (!arg.starts_with("--") && arg[1..].contains('h')))
}

pub fn run<W: Write>(args: CommandLineArgs, out: &mut W) -> Result<()> {
    match args {
        CommandLineArgs::FullHelp => {
            write!(out, "{}", full_help())?;
            Ok(())
        }
        CommandLineArgs::Run {
            command: Command::Post(args),
            ..
        } => post_command(&args),
        CommandLineArgs::Run {
            command: Command::List(args),
            ..
        } => list_command(&args, out),
    }
}

/// Post a status. The exit status does not reflect whether the server
/// accepted it; a rejection only shows up as a warning in the log.
pub fn post_command(args: &PostArgs) -> Result<()> {
    let api = ApiClient::new(&args.endpoint.endpoint)?;
    let accepted = api
        .post(&args.message, &args.app, &args.tags)
        .context("when posting status")?;
    if accepted {
        info!(app = %args.app, "status posted");
    }
    Ok(())
}

/// List statuses. Prints nothing when the server has no list for us.
pub fn list_command<W: Write>(args: &ListArgs, out: &mut W) -> Result<()> {
    let api = ApiClient::new(&args.endpoint.endpoint)?;
    let Some(list) = api
        .get(args.count, args.min_id)
        .context("when listing statuses")?
    else {
        return Ok(());
    };
    writeln!(out, "{}", render(&list, args.format)?)?;
    Ok(())
}
