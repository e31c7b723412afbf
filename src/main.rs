use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use recobot::catalog_store::{load_import_file, CatalogStore, SqliteCatalogStore};
use recobot::cli_style::{self, get_styles, CommandHelp};
use recobot::config::{AppConfig, CliConfig, FileConfig, OutputFormat};
use recobot::search::Recommender;
use recobot::sqlite_persistence::open_shared;
use recobot::vocabulary::VocabularyStore;
use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles(), version, about = "Recommandations de films en langage naturel")]
struct CliArgs {
    /// Path to the SQLite movie database.
    #[clap(value_parser = parse_path, default_value = "movies.db")]
    pub db_path: PathBuf,

    /// Optional TOML config file; its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Answer a single request and exit.
    #[clap(long)]
    pub query: Option<String>,

    /// Print results as JSON.
    #[clap(long)]
    pub json: bool,

    /// JSON file of movies to import before starting.
    #[clap(long, value_parser = parse_path)]
    pub import: Option<PathBuf>,

    /// Default log level, LOG_LEVEL still takes precedence.
    #[clap(long)]
    pub log_level: Option<String>,
}

#[derive(Parser)]
#[command(styles=get_styles(), name = "", disable_help_subcommand = true)]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Lists the catalog by title: `list` or `list page <n>`.
    List { args: Vec<String> },
    /// Adds a vocabulary word or a stop word.
    Add {
        #[command(subcommand)]
        target: AddTarget,
    },
    /// Shows movies sharing a genre with the given title.
    Similar {
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Imports movies from a JSON file.
    Import { path: PathBuf },
    /// Shows catalog and vocabulary sizes.
    Stats,
    /// Re-reads the vocabulary from the database.
    Reload,
    /// Shows the available commands.
    Help,
    /// Close this program.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
enum AddTarget {
    /// Classifies a word under a genre or theme.
    Word {
        word: String,
        category: String,
        #[arg(required = true)]
        subcategory: Vec<String>,
    },
    /// Marks a word as ignorable.
    Stop { word: String },
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

const ADD_WORD_FORMAT: &str = "Format: add word <mot> <genre|theme> <sous-catégorie>";

const COMMANDS_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "list",
        args: "[page <n>]",
        description: "Liste les films par titre",
    },
    CommandHelp {
        name: "similar",
        args: "<titre>",
        description: "Films du même genre qu'un titre",
    },
    CommandHelp {
        name: "import",
        args: "<fichier.json>",
        description: "Importe des films dans le catalogue",
    },
    CommandHelp {
        name: "stats",
        args: "",
        description: "Taille du catalogue et du vocabulaire",
    },
    CommandHelp {
        name: "add",
        args: "word <mot> <genre|theme> <sous-catégorie>",
        description: "Ajoute un mot significatif",
    },
    CommandHelp {
        name: "add",
        args: "stop <mot>",
        description: "Ajoute un mot ignoré",
    },
    CommandHelp {
        name: "reload",
        args: "",
        description: "Recharge le vocabulaire depuis la base",
    },
    CommandHelp {
        name: "help",
        args: "",
        description: "Affiche cette aide",
    },
    CommandHelp {
        name: "quit",
        args: "",
        description: "Quitte le programme (alias: exit)",
    },
];

struct Session {
    recommender: Recommender,
    config: AppConfig,
}

/// Names (and aliases) that make a line a command rather than a request.
fn command_names() -> Vec<String> {
    InnerCli::command()
        .get_subcommands()
        .flat_map(|sc| {
            std::iter::once(sc.get_name().to_string())
                .chain(sc.get_all_aliases().map(String::from))
        })
        .collect()
}

/// Lower-cases the command and, for `add`, its target, leaving user values
/// such as titles and paths untouched.
fn normalize_command_keywords(mut args: Vec<String>) -> Vec<String> {
    let keywords = match args.first().map(|a| a.to_lowercase()) {
        Some(command) if command == "add" => 2,
        _ => 1,
    };
    for arg in args.iter_mut().take(keywords) {
        *arg = arg.to_lowercase();
    }
    args
}

fn parse_list_page(args: &[String]) -> Result<usize, String> {
    let number = match args {
        [] => return Ok(1),
        [page, n] if page.eq_ignore_ascii_case("page") => n,
        [n] => n,
        _ => return Err("Format: list [page <n>]".to_string()),
    };
    number
        .parse::<usize>()
        .map_err(|_| format!("Numéro de page invalide: '{}'", number))
}

fn import_file(catalog: &dyn CatalogStore, path: &Path) -> Result<usize> {
    let records = load_import_file(path)?;
    catalog
        .insert_movies(&records)
        .with_context(|| format!("Failed to import {:?}", path))
}

fn print_json<T: serde::Serialize>(value: &T) -> CommandExecutionResult {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            CommandExecutionResult::Ok
        }
        Err(err) => CommandExecutionResult::Error(format!("{}", err)),
    }
}

fn handle_request(session: &Session, line: &str) -> CommandExecutionResult {
    let recommendation = session.recommender.recommend(line);
    match session.config.output {
        OutputFormat::Json => print_json(&recommendation),
        OutputFormat::Text => {
            cli_style::print_recommendation(&recommendation);
            CommandExecutionResult::Ok
        }
    }
}

fn execute_command(line: &str, session: &Session) -> CommandExecutionResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());
    let is_command = args
        .first()
        .map(|first| command_names().iter().any(|c| c == &first.to_lowercase()))
        .unwrap_or(false);
    if !is_command {
        return handle_request(session, line);
    }

    let cli = InnerCli::try_parse_from(
        std::iter::once(" ".to_string()).chain(normalize_command_keywords(args)),
    );
    let cli = match cli {
        Ok(cli) => cli,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return CommandExecutionResult::Ok;
        }
    };

    let recommender = &session.recommender;
    match cli.command {
        InnerCommand::List { args } => {
            let page = match parse_list_page(&args) {
                Ok(page) => page,
                Err(msg) => return CommandExecutionResult::Error(msg),
            };
            match recommender
                .catalog()
                .list_movies(page, session.config.list_page_size)
            {
                Ok(page) => match session.config.output {
                    OutputFormat::Json => return print_json(&page),
                    OutputFormat::Text => cli_style::print_catalog_page(&page),
                },
                Err(err) => return CommandExecutionResult::Error(format!("{:#}", err)),
            }
        }
        InnerCommand::Add { target } => match target {
            AddTarget::Word {
                word,
                category,
                subcategory,
            } => {
                let subcategory = subcategory.join(" ");
                match recommender
                    .vocabulary()
                    .add_vocabulary_word(&word, &category, &subcategory)
                {
                    Ok(entry) => cli_style::print_success(&format!(
                        "Mot '{}' ajouté: {}/{}",
                        entry.word,
                        entry.category.as_str(),
                        entry.subcategory
                    )),
                    Err(err) => {
                        return CommandExecutionResult::Error(format!(
                            "{}. {}",
                            err, ADD_WORD_FORMAT
                        ))
                    }
                }
            }
            AddTarget::Stop { word } => match recommender.vocabulary().add_stop_word(&word) {
                Ok(word) => cli_style::print_success(&format!("Mot ignoré '{}' ajouté", word)),
                Err(err) => {
                    return CommandExecutionResult::Error(format!(
                        "{}. Format: add stop <mot>",
                        err
                    ))
                }
            },
        },
        InnerCommand::Similar { title } => {
            let title = title.join(" ");
            let movies = recommender.similar(&title);
            match session.config.output {
                OutputFormat::Json => return print_json(&movies),
                OutputFormat::Text => cli_style::print_similar(&title, &movies),
            }
        }
        InnerCommand::Import { path } => match import_file(recommender.catalog(), &path) {
            Ok(count) => cli_style::print_success(&format!("{} films importés", count)),
            Err(err) => return CommandExecutionResult::Error(format!("{:#}", err)),
        },
        InnerCommand::Stats => {
            let vocabulary = recommender.vocabulary().snapshot();
            let movies = match recommender.catalog().count_movies() {
                Ok(count) => count.to_string(),
                Err(err) => return CommandExecutionResult::Error(format!("{:#}", err)),
            };
            cli_style::print_section_header("Statistiques");
            cli_style::print_key_value("Base", &session.config.db_path.display().to_string());
            cli_style::print_key_value("Films", &movies);
            cli_style::print_key_value("Mots significatifs", &vocabulary.len().to_string());
            cli_style::print_key_value("Mots ignorés", &vocabulary.stop_word_count().to_string());
            cli_style::print_section_footer();
        }
        InnerCommand::Reload => {
            if let Err(err) = recommender.vocabulary().reload() {
                return CommandExecutionResult::Error(format!("{:#}", err));
            }
            let vocabulary = recommender.vocabulary().snapshot();
            cli_style::print_success(&format!(
                "Vocabulaire rechargé: {} mots significatifs, {} mots ignorés",
                vocabulary.len(),
                vocabulary.stop_word_count()
            ));
        }
        InnerCommand::Help => cli_style::print_help(COMMANDS_HELP),
        InnerCommand::Quit => return CommandExecutionResult::Exit,
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct CommandHelper {
    commands_names: Vec<String>,
}

impl CommandHelper {
    pub fn new() -> Self {
        CommandHelper {
            commands_names: command_names(),
        }
    }
}

impl Completer for CommandHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for CommandHelper {}
impl Validator for CommandHelper {}
impl Helper for CommandHelper {}

fn init_logging(level: &str) {
    let default_level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init();
    if level.parse::<LevelFilter>().is_err() {
        warn!("Unknown log level '{}', using info", level);
    }
}

fn run_repl(session: &Session) -> Result<()> {
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut rl = Editor::<CommandHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(CommandHelper::new()));

    let prompt = cli_style::get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(&line, session) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => {
                        cli_style::print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                cli_style::print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    cli_style::print_goodbye();
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        db_path: Some(cli_args.db_path.clone()),
        log_level: cli_args.log_level.clone(),
        output: if cli_args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    init_logging(&config.log_level);

    info!("Opening SQLite database at {:?}...", config.db_path);
    let conn = open_shared(&config.db_path)?;
    let vocabulary = Arc::new(VocabularyStore::new(conn.clone(), config.seed_vocabulary)?);
    let catalog = Arc::new(SqliteCatalogStore::new(conn)?);

    if let Some(path) = &cli_args.import {
        let count = import_file(catalog.as_ref(), path)?;
        info!("Imported {} movies from {:?}", count, path);
    }

    let movie_count = catalog.count_movies()?;
    let snapshot = vocabulary.snapshot();
    info!(
        "Catalog ready: {} movies, {} significant words, {} stop words",
        movie_count,
        snapshot.len(),
        snapshot.stop_word_count()
    );
    if movie_count == 0 {
        warn!("The movie catalog is empty, every request will return no results");
    }

    let session = Session {
        recommender: Recommender::new(vocabulary, catalog),
        config,
    };

    if let Some(query) = &cli_args.query {
        let recommendation = session.recommender.recommend(query);
        match session.config.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recommendation)?),
            OutputFormat::Text => println!("{}", recommendation.render()),
        }
        return Ok(());
    }

    cli_style::print_welcome(&[
        ("Base", session.config.db_path.display().to_string()),
        ("Films", movie_count.to_string()),
        ("Mots significatifs", snapshot.len().to_string()),
        ("Version", env!("CARGO_PKG_VERSION").to_string()),
    ]);
    if movie_count == 0 {
        cli_style::print_warning("Le catalogue est vide: utilisez 'import <fichier.json>'");
    } else {
        cli_style::print_info("Exemple: \"une comédie récente et populaire\"");
    }

    run_repl(&session)
}
