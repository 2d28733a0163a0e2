#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;
use crate::domain::models::SearchName;
use crate::domain::models::DEFAULT_DAILY_HOURS;
use crate::domain::models::DEFAULT_TOTAL_DAYS;
use crate::domain::services::actions::help_text;

/// Where the syllabus for a one-shot plan comes from. With neither a file nor
/// text, the syllabus is read from stdin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyllabusInput {
    pub file: Option<path::PathBuf>,
    pub text: Option<String>,
    pub total_days: u32,
    pub daily_hours: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Chat,
    Syllabus(SyllabusInput),
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
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

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Build a study plan through a guided conversation. This is the default when no subcommand is given.");
}

fn subcommand_syllabus() -> Command {
    return Command::new("syllabus")
        .about("Generate a study plan in one shot from a syllabus. Reads the syllabus from stdin when neither --file nor --text is set.")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .num_args(1)
                .value_parser(value_parser!(path::PathBuf))
                .conflicts_with("text")
                .help("Path to a syllabus PDF or text file."),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .num_args(1)
                .help("Syllabus text pasted directly."),
        )
        .arg(
            Arg::new("days")
                .short('d')
                .long("days")
                .num_args(1)
                .value_parser(value_parser!(u32).range(1..))
                .default_value("30")
                .help("Total available days."),
        )
        .arg(
            Arg::new("hours")
                .long("hours")
                .num_args(1)
                .value_parser(value_parser!(u32).range(1..))
                .default_value("2")
                .help("Daily study hours."),
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nBuilt: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_BUILD_TIMESTAMP")
    );

    return Command::new("studyplanner")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_syllabus())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("STUDYPLANNER_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Backend.to_string())
                .short('b')
                .long(ConfigKey::Backend.to_string())
                .env("STUDYPLANNER_BACKEND")
                .num_args(1)
                .help(format!("The backend hosting a model to connect to. [default: {}]", Config::default(ConfigKey::Backend)))
                .value_parser(PossibleValuesParser::new(BackendName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::BackendTimeout.to_string())
                .long(ConfigKey::BackendTimeout.to_string())
                .env("STUDYPLANNER_BACKEND_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before timing out when doing a request to a backend or search provider. [default: {}]", Config::default(ConfigKey::BackendTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Model.to_string())
                .short('m')
                .long(ConfigKey::Model.to_string())
                .env("STUDYPLANNER_MODEL")
                .num_args(1)
                .help(format!("The model on a backend to consume. [default: {}]", Config::default(ConfigKey::Model)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OllamaURL.to_string())
                .long(ConfigKey::OllamaURL.to_string())
                .env("STUDYPLANNER_OLLAMA_URL")
                .num_args(1)
                .help(format!("Ollama API URL when using the Ollama backend. [default: {}]", Config::default(ConfigKey::OllamaURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiURL.to_string())
                .long(ConfigKey::OpenAiURL.to_string())
                .env("STUDYPLANNER_OPENAI_URL")
                .num_args(1)
                .help(format!("OpenAI compatible API URL when using the OpenAI backend. Defaults to Groq. [default: {}]", Config::default(ConfigKey::OpenAiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiToken.to_string())
                .long(ConfigKey::OpenAiToken.to_string())
                .env("STUDYPLANNER_OPENAI_TOKEN")
                .num_args(1)
                .help("OpenAI compatible API token when using the OpenAI backend.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OutputDir.to_string())
                .short('o')
                .long(ConfigKey::OutputDir.to_string())
                .env("STUDYPLANNER_OUTPUT_DIR")
                .num_args(1)
                .help(format!("Directory generated study plans are saved to. [default: {}]", Config::default(ConfigKey::OutputDir)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Search.to_string())
                .long(ConfigKey::Search.to_string())
                .env("STUDYPLANNER_SEARCH")
                .num_args(1)
                .help(format!("Search provider used to find learning resources. [default: {}]", Config::default(ConfigKey::Search)))
                .value_parser(PossibleValuesParser::new(SearchName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SerperURL.to_string())
                .long(ConfigKey::SerperURL.to_string())
                .env("STUDYPLANNER_SERPER_URL")
                .num_args(1)
                .help(format!("Serper API URL. [default: {}]", Config::default(ConfigKey::SerperURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SerperToken.to_string())
                .long(ConfigKey::SerperToken.to_string())
                .env("STUDYPLANNER_SERPER_TOKEN")
                .num_args(1)
                .help("Serper API token.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Temperature.to_string())
                .long(ConfigKey::Temperature.to_string())
                .env("STUDYPLANNER_TEMPERATURE")
                .num_args(1)
                .help(format!("Sampling temperature sent with every completion request. [default: {}]", Config::default(ConfigKey::Temperature)))
                .global(true),
        );
}

fn syllabus_input(matches: &ArgMatches) -> SyllabusInput {
    return SyllabusInput {
        file: matches.get_one::<path::PathBuf>("file").cloned(),
        text: matches.get_one::<String>("text").cloned(),
        total_days: matches
            .get_one::<u32>("days")
            .copied()
            .unwrap_or(DEFAULT_TOTAL_DAYS),
        daily_hours: matches
            .get_one::<u32>("hours")
            .copied()
            .unwrap_or(DEFAULT_DAILY_HOURS),
    };
}

/// Returns the mode to run, or `None` when the command has already done its
/// work and the program should exit.
pub async fn handle(matches: ArgMatches) -> Result<Option<Mode>> {
    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(Mode::Chat));
        }
        Some(("syllabus", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(Mode::Syllabus(syllabus_input(subcmd_matches))));
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => {
            match subcmd_matches.subcommand() {
                Some(("create", _)) => {
                    create_config_file().await?;
                }
                Some(("default", _)) => {
                    println!("{}", Config::serialize_default(build()));
                }
                Some(("path", _)) => {
                    println!("{}", Config::default(ConfigKey::ConfigFile));
                }
                _ => {
                    subcommand_config().print_long_help()?;
                }
            }
            return Ok(None);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
            return Ok(Some(Mode::Chat));
        }
    }
}

pub async fn parse() -> Result<Option<Mode>> {
    return handle(build().get_matches()).await;
}
