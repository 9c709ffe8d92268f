mod platform;

use clap::Parser;

use platform::config::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Browse(args) => platform::app::run_browse(args.try_into()?, cli.log_level),
        Command::Relay(args) => platform::relay::run_relay(args.try_into()?, cli.log_level),
    }
}
