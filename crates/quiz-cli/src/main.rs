// # geoquiz - Terminal Quiz Player
//
// Thin interactive front end for the GeoQuiz engine.
//
// The binary is an integration layer only: it loads a country dump, wires
// up the engine, and translates between the event channel and the
// terminal. All quiz logic lives in quiz-core.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `GEOQUIZ_DATA_PATH`: Path to a REST-Countries-shaped JSON dump (required)
// - `GEOQUIZ_QUESTION_COUNT`: Questions per round, 1-10 (default 10)
// - `GEOQUIZ_REVEAL_DELAY_MS`: Pause before the next question (default 500)
// - `GEOQUIZ_LOG_LEVEL`: trace | debug | info | warn | error (default warn)
//
// ## Example
//
// ```bash
// export GEOQUIZ_DATA_PATH=data/countries.json
// geoquiz
// ```

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use quiz_core::{CountrySource, QuizConfig, QuizEngine, QuizEvent};
use quiz_source_json::JsonFileSource;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum QuizExitCode {
    /// Clean exit (round finished or player quit)
    Clean = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected)
    RuntimeError = 2,
}

impl From<QuizExitCode> for ExitCode {
    fn from(code: QuizExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    data_path: String,
    question_count: usize,
    reveal_delay_ms: u64,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            data_path: env::var("GEOQUIZ_DATA_PATH")
                .context("GEOQUIZ_DATA_PATH is required. Point it at a countries JSON dump")?,
            question_count: env::var("GEOQUIZ_QUESTION_COUNT")
                .ok()
                .map(|s| s.parse().unwrap_or(10))
                .unwrap_or(10),
            reveal_delay_ms: env::var("GEOQUIZ_REVEAL_DELAY_MS")
                .ok()
                .map(|s| s.parse().unwrap_or(500))
                .unwrap_or(500),
            log_level: env::var("GEOQUIZ_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.data_path.is_empty() {
            anyhow::bail!("GEOQUIZ_DATA_PATH cannot be empty");
        }

        if !std::path::Path::new(&self.data_path).exists() {
            anyhow::bail!("GEOQUIZ_DATA_PATH does not exist: {}", self.data_path);
        }

        if self.question_count == 0 || self.question_count > 10 {
            anyhow::bail!(
                "GEOQUIZ_QUESTION_COUNT must be between 1 and 10. Got: {}",
                self.question_count
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "GEOQUIZ_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return QuizExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return QuizExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return QuizExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return QuizExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match play(config).await {
            Ok(()) => QuizExitCode::Clean,
            Err(e) => {
                error!("Quiz error: {}", e);
                QuizExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Load the data, run one round, print the score
async fn play(config: Config) -> Result<()> {
    let source = JsonFileSource::new(&config.data_path);
    let countries = source.load().await?;
    info!(countries = countries.len(), "country data ready");

    let quiz_config = QuizConfig {
        question_count: config.question_count,
        reveal_delay_ms: config.reveal_delay_ms,
        ..QuizConfig::default()
    };
    let rng = Box::new(StdRng::from_entropy());

    let (mut engine, mut events) = QuizEngine::new(countries, quiz_config, rng)?;

    println!("GeoQuiz: answer with 1-4, or q to quit.\n");
    engine.start();

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    while let Some(event) = events.recv().await {
        match event {
            QuizEvent::Question { question, .. } => {
                println!(
                    "Question {}/{}: {}",
                    engine.current_question_index() + 1,
                    engine.total_questions(),
                    question.text
                );
                if let Some(flag) = &question.flag {
                    println!("  (flag: {})", flag);
                }
                for (i, option) in question.options.iter().enumerate() {
                    println!("  {}. {}", i + 1, option);
                }

                match read_choice(&mut input, question.options.len()).await? {
                    Some(index) => engine.choose(&question.options[index]),
                    None => {
                        println!("Bye!");
                        return Ok(());
                    }
                }
            }
            QuizEvent::Feedback {
                is_correct,
                correct_answer,
                ..
            } => {
                if is_correct {
                    println!("Correct!\n");
                } else {
                    println!("Wrong. The answer was {}.\n", correct_answer);
                }
            }
            QuizEvent::Finished { score, total } => {
                println!("Round over: {}/{} correct.", score, total);
                break;
            }
        }
    }

    Ok(())
}

/// Read a 1-based option choice from stdin
///
/// Returns `Ok(None)` when the player quits or stdin closes.
async fn read_choice(
    input: &mut Lines<BufReader<Stdin>>,
    option_count: usize,
) -> Result<Option<usize>> {
    loop {
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        match trimmed.parse::<usize>() {
            Ok(n) if (1..=option_count).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("Please enter a number between 1 and {}.", option_count),
        }
    }
}
