mod commands;
mod terminal;

use commands::{CommandLine, Commands, check, dmz, firewall, module, tagging, vlan, wan, watch};
use lanward_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet, commands.verbose);

    let cfg = Config {
        endpoint: commands.endpoint,
        session: commands.session,
        dry_run: commands.dry_run,
        quiet: commands.quiet,
    };

    let result: anyhow::Result<()> = match commands.command {
        Commands::Check(cmd) => check::check(cmd, &cfg),
        Commands::Vlan(cmd) => vlan::vlan(cmd, &cfg).await,
        Commands::Firewall(cmd) => firewall::firewall(cmd, &cfg).await,
        Commands::Dmz(cmd) => dmz::dmz(cmd, &cfg).await,
        Commands::Tagging(cmd) => tagging::tagging(cmd, &cfg).await,
        Commands::Wan(args) => wan::wan(args, &cfg).await,
        Commands::Module {
            module: name,
            action,
            force,
        } => module::module(name, action, force, &cfg).await,
        Commands::Status => module::status(&cfg).await,
        Commands::Watch { modules, count } => watch::watch(modules, count, &cfg).await,
    };

    if cfg.quiet == 0 {
        print::end_of_program();
    }
    result
}
