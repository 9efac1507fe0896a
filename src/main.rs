use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use colored::*;

use hostwatch::commands;

fn build_cli() -> Command {
    Command::new("hostwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Host resource monitor with threshold alerts and a read-only log hub")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("monitor")
                .about("Sample host metrics on a fixed interval and raise critical alerts")
                .arg(
                    Arg::new("interval")
                        .value_name("SECONDS")
                        .help("Seconds between samples (at least 1, default 5)"),
                )
                .arg(
                    Arg::new("no-clear")
                        .long("no-clear")
                        .help("Do not clear the screen between cycles")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("hub")
                .about("Serve combined logs and a 24-hour summary over HTTP")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Bind address (overrides HOST)"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Bind port (overrides PORT)")
                        .value_parser(clap::value_parser!(u16)),
                ),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    hostwatch::init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    let result = match matches.subcommand() {
        Some(("monitor", sub_matches)) => commands::monitor::execute(sub_matches),
        Some(("hub", sub_matches)) => commands::hub::execute(sub_matches),
        Some(("version", _)) => commands::version(),
        _ => {
            println!("Use 'hostwatch --help' for more information.");
            Ok(())
        }
    };

    if let Err(e) = &result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}
