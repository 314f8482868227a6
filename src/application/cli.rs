#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Account;
use crate::domain::models::AccountDirectory;
use crate::domain::models::Api;
use crate::domain::models::Page;
use crate::domain::models::Tone;
use crate::domain::models::UpcomingPost;
use crate::domain::services::keymap::help_text;
use crate::infrastructure::accounts::ConfigAccounts;
use crate::infrastructure::api::HttpApi;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn log_path() -> path::PathBuf {
    let log_dir = env::var("LINKPOST_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("linkpost")
            .to_string_lossy()
            .to_string();
    });

    return path::PathBuf::from(log_dir).join("debug.log");
}

fn format_upcoming_post(post: &UpcomingPost) -> String {
    return format!("- {}: {}", post.display_time(), post.first_line(70));
}

fn format_upcoming_posts(posts: &[UpcomingPost]) -> String {
    if posts.is_empty() {
        return "There are no scheduled posts.".to_string();
    }

    return posts
        .iter()
        .map(format_upcoming_post)
        .collect::<Vec<String>>()
        .join("\n");
}

fn format_accounts(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "There are no LinkedIn accounts configured. Add [[accounts]] tables to your config file."
            .to_string();
    }

    return accounts
        .iter()
        .map(|account| return format!("- (ID: {}) {}", account.id, account.name))
        .collect::<Vec<String>>()
        .join("\n");
}

async fn print_upcoming_posts() -> Result<()> {
    let res = HttpApi::default().upcoming_posts().await?;
    println!("{}", format_upcoming_posts(&res.posts));
    return Ok(());
}

async fn print_accounts_list() -> Result<()> {
    let accounts = ConfigAccounts::from_config().await?;
    println!("{}", format_accounts(&accounts.list()));
    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    let parent = config_file_path
        .parent()
        .ok_or_else(|| return anyhow!("Invalid config file path {config_file_path_str}"))?;
    if !parent.exists() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for linkpost")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running linkpost with environment variable RUST_LOG=linkpost")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_posts() -> Command {
    return Command::new("posts")
        .about("Inspect posts held by the linkpost server.")
        .arg_required_else_help(true)
        .subcommand(Command::new("upcoming").about("List scheduled posts that have not been published yet."));
}

fn subcommand_accounts() -> Command {
    return Command::new("accounts")
        .about("Manage LinkedIn accounts available for publishing.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List the LinkedIn accounts declared in the config file."));
}

pub fn build() -> Command {
    let keys_text = Page::iter()
        .map(|page| return format!("  {page}: {}", help_text(page)))
        .collect::<Vec<String>>()
        .join("\n");

    let after_help = format!(
        "{}\n{keys_text}",
        "KEY BINDINGS:".underline().bold()
    );

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("linkpost")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(after_help)
        .arg_required_else_help(false)
        .subcommand(Command::new("tui").about("Start the terminal UI. This is the default when no subcommand is given."))
        .subcommand(subcommand_posts())
        .subcommand(subcommand_accounts())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("LINKPOST_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ServerURL.to_string())
                .short('u')
                .long(ConfigKey::ServerURL.to_string())
                .env("LINKPOST_SERVER_URL")
                .num_args(1)
                .help(format!("Base URL of the linkpost server. [default: {}]", Config::default(ConfigKey::ServerURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Tone.to_string())
                .short('t')
                .long(ConfigKey::Tone.to_string())
                .env("LINKPOST_TONE")
                .num_args(1)
                .help(format!("The tone selected when the generate form opens. [default: {}]", Config::default(ConfigKey::Tone)))
                .value_parser(PossibleValuesParser::new(Tone::VARIANTS))
                .global(true),
        );
}

/// Parses arguments and runs one-shot subcommands. Returns true when the
/// terminal UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_path().to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    println!("{}", ConfigKey::VARIANTS.join("\n"));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("tui", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("posts", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("upcoming", _)) => {
                    print_upcoming_posts().await?;
                }
                _ => {
                    subcommand_posts().print_long_help()?;
                }
            }
            return Ok(false);
        }
        Some(("accounts", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("list", _)) => {
                    print_accounts_list().await?;
                }
                _ => {
                    subcommand_accounts().print_long_help()?;
                }
            }
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
