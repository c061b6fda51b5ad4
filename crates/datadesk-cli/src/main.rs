use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use datadesk::{AppConfig, Workbench};
use datadesk_cli::config::{default_config_json, load_config};
use datadesk_cli::shell;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DATADESK_LOG", "error"))
        .init();

    let matches = Command::new("datadesk")
        .version(clap::crate_version!())
        .about("\u{1F4CA} datadesk - matrix operations, data visualization and linear regression")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON configuration file. Missing fields take their defaults.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("config").about("Print the configuration as JSON (the defaults unless --config is given)"),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let config = resolve_config(&matches)?;

    match matches.subcommand() {
        Some(("config", _)) => {
            if matches.get_one::<PathBuf>("config").is_some() {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("{}", default_config_json()?);
            }
            Ok(())
        }
        _ => {
            log::info!("Starting session, charts go to {}", config.output_dir.display());
            shell::run_stdio(Workbench::new(config))
        }
    }
}

fn resolve_config(matches: &ArgMatches) -> Result<AppConfig> {
    let config_path = matches
        .get_one::<PathBuf>("config")
        .or_else(|| {
            matches
                .subcommand_matches("config")
                .and_then(|m| m.get_one::<PathBuf>("config"))
        });
    match config_path {
        Some(path) => {
            log::info!("Using config: {:?}", path);
            load_config(path)
        }
        None => Ok(AppConfig::default()),
    }
}
