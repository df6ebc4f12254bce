// Entrypoint for the `phatik` CLI.
// - Keeps `main` small: parse arguments, set up logging, hand off to `cli::run`.
// - Usage errors exit through clap (status 2); transport and decode failures
//   bubble up as `anyhow` errors and exit non-zero.

use phatik::cli::{self, CommandLineArgs};
use phatik::logging;

fn main() -> anyhow::Result<()> {
    let args = CommandLineArgs::try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit());
    logging::init(args.verbose());

    let stdout = std::io::stdout();
    cli::run(args, &mut stdout.lock())
}
