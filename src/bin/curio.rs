//! Curio CLI - Command-line interface for Curio Engine
//!
//! Commands:
//! - simulate: Replay a recorded interaction-event log into a result card
//! - questions: Preview a question selection for a behavior snapshot
//! - resolve: Map a behavior score to its archetype
//! - doctor: Check custom content files and environment
//! - schema: Print input/output data contracts

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use curio_engine::{
    default_archetype_table, default_question_pool, generate_insight, pool_from_json,
    resolve_archetype, select_questions, ArchetypeTable, BehaviorRecord, BehaviorTracker,
    InteractionEvent, ResultCard, DEFAULT_QUESTION_COUNT, ENGINE_VERSION, PRODUCER_NAME,
};

/// Curio - Behavior-scoring and adaptive question-selection engine
#[derive(Parser)]
#[command(name = "curio")]
#[command(author = "Curio Labs")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Replay and inspect Curio quiz sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded interaction-event log into a result card
    Simulate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,

        /// Session start (RFC3339); defaults to the earliest event timestamp
        #[arg(long)]
        session_start: Option<String>,

        /// Seed for deterministic archetype variant selection
        #[arg(long)]
        seed: Option<u64>,

        /// Custom archetype table JSON file
        #[arg(long)]
        table: Option<PathBuf>,
    },

    /// Preview a question selection for a behavior snapshot
    Questions {
        /// Number of questions to select
        #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
        count: usize,

        /// Behavior snapshot JSON file (defaults to a fresh record)
        #[arg(long)]
        behavior: Option<PathBuf>,

        /// Custom question pool JSON file
        #[arg(long)]
        pool: Option<PathBuf>,

        /// Seed for deterministic selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Map a behavior score to its archetype
    Resolve {
        /// Final behavior score
        score: u32,

        /// Custom archetype table JSON file
        #[arg(long)]
        table: Option<PathBuf>,

        /// Seed for deterministic variant selection
        #[arg(long)]
        seed: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check custom content files and environment
    Doctor {
        /// Question pool JSON file to check
        #[arg(long)]
        pool: Option<PathBuf>,

        /// Archetype table JSON file to check
        #[arg(long)]
        table: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print input/output data contracts
    Schema {
        /// Contract to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one event per line)
    Ndjson,
    /// JSON array of events
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input contract (interaction event log)
    Input,
    /// Output contract (result card)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CurioCliError> {
    match cli.command {
        Commands::Simulate {
            input,
            input_format,
            output_format,
            session_start,
            seed,
            table,
        } => cmd_simulate(
            &input,
            input_format,
            output_format,
            session_start.as_deref(),
            seed,
            table.as_deref(),
        ),

        Commands::Questions {
            count,
            behavior,
            pool,
            seed,
        } => cmd_questions(count, behavior.as_deref(), pool.as_deref(), seed),

        Commands::Resolve {
            score,
            table,
            seed,
            json,
        } => cmd_resolve(score, table.as_deref(), seed, json),

        Commands::Doctor { pool, table, json } => cmd_doctor(pool.as_deref(), table.as_deref(), json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_simulate(
    input: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
    session_start: Option<&str>,
    seed: Option<u64>,
    table_path: Option<&Path>,
) -> Result<(), CurioCliError> {
    let input_data = read_input(input)?;

    let mut events = parse_events(&input_data, input_format)?;
    if events.is_empty() {
        return Err(CurioCliError::NoEvents);
    }
    events.sort_by_key(|e| e.timestamp);

    let started_at = match session_start {
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw)
            .map_err(|e| CurioCliError::ParseError(format!("Invalid session start: {}", e)))?
            .with_timezone(&chrono::Utc),
        None => events[0].timestamp,
    };

    let mut tracker = BehaviorTracker::new(started_at);
    for event in &events {
        tracker.apply(event);
    }

    let table = load_table(table_path)?;
    let mut rng = make_rng(seed);
    let record = tracker.record();
    let archetype = resolve_archetype(record.behavior_score, &table, &mut rng);
    let insight = generate_insight(record);
    let card = ResultCard::compose(archetype, insight, record, chrono::Utc::now());

    print_json(&card, output_format)?;
    Ok(())
}

fn cmd_questions(
    count: usize,
    behavior_path: Option<&Path>,
    pool_path: Option<&Path>,
    seed: Option<u64>,
) -> Result<(), CurioCliError> {
    let snapshot: BehaviorRecord = match behavior_path {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => BehaviorRecord::default(),
    };

    let pool = match pool_path {
        Some(path) => pool_from_json(&fs::read_to_string(path)?)?,
        None => default_question_pool(),
    };

    let mut rng = make_rng(seed);
    let questions = select_questions(&pool, count, &snapshot, &mut rng);
    println!("{}", serde_json::to_string_pretty(&questions)?);
    Ok(())
}

fn cmd_resolve(
    score: u32,
    table_path: Option<&Path>,
    seed: Option<u64>,
    json: bool,
) -> Result<(), CurioCliError> {
    let table = load_table(table_path)?;
    let mut rng = make_rng(seed);
    let archetype = resolve_archetype(score, &table, &mut rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&archetype)?);
    } else {
        println!("{}", archetype.name);
        println!("{}", archetype.tagline);
        println!();
        println!("{}", archetype.description);
    }
    Ok(())
}

fn cmd_doctor(
    pool_path: Option<&Path>,
    table_path: Option<&Path>,
    json: bool,
) -> Result<(), CurioCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    match pool_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => match pool_from_json(&content) {
                Ok(pool) => checks.push(DoctorCheck {
                    name: "pool".to_string(),
                    status: CheckStatus::Ok,
                    message: format!("{} questions loaded", pool.len()),
                }),
                Err(e) => checks.push(DoctorCheck {
                    name: "pool".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Invalid pool JSON: {}", e),
                }),
            },
            Err(e) => checks.push(DoctorCheck {
                name: "pool".to_string(),
                status: CheckStatus::Error,
                message: format!("Cannot read pool file: {}", e),
            }),
        },
        None => checks.push(DoctorCheck {
            name: "pool".to_string(),
            status: CheckStatus::Ok,
            message: format!(
                "using embedded pool ({} questions)",
                default_question_pool().len()
            ),
        }),
    }

    match table_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => match ArchetypeTable::from_json(&content) {
                Ok(table) => checks.push(DoctorCheck {
                    name: "table".to_string(),
                    status: CheckStatus::Ok,
                    message: format!(
                        "{} archetypes, {} ranges",
                        table.archetypes().len(),
                        table.ranges().len()
                    ),
                }),
                Err(e) => checks.push(DoctorCheck {
                    name: "table".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Invalid table JSON: {}", e),
                }),
            },
            Err(e) => checks.push(DoctorCheck {
                name: "table".to_string(),
                status: CheckStatus::Error,
                message: format!("Cannot read table file: {}", e),
            }),
        },
        None => checks.push(DoctorCheck {
            name: "table".to_string(),
            status: CheckStatus::Ok,
            message: "using embedded archetype table".to_string(),
        }),
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (event-log replay ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Curio Doctor Report");
        println!("===================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CurioCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), CurioCliError> {
    match schema_type {
        SchemaType::Input => {
            println!("Input: interaction event log");
            println!();
            println!("One event per NDJSON line (or a JSON array), each with:");
            println!("- timestamp: RFC3339 instant the event fired");
            println!("- event_type: one of");
            println!("  first_interaction    first engagement (recorded once)");
            println!("  answer               chosen option; payload: option_id");
            println!("  hover_start          cursor entered an answer option");
            println!("  hover_end            cursor left an answer option");
            println!("  scroll               a scroll event fired");
            println!("  scroll_depth         observed depth ratio; payload: depth (0-1)");
            println!("  mouse_move           one mouse-movement event");
            println!("  movement_sample      periodic sampling tick (every 5s)");
        }
        SchemaType::Output => {
            println!("Output: result card");
            println!();
            println!("- card_id: unique card identifier");
            println!("- producer: {{ name, version }}");
            println!("- computed_at_utc: RFC3339 composition time");
            println!("- archetype: {{ id, name, tagline, description, observations, closing }}");
            println!("- insight: behavior insight text");
            println!("- share_text: plain-text share form");
            println!("- behavior: {{ behavior_score, time_to_first_interaction_ms,");
            println!("              average_answer_time_ms, total_hover_time_ms, scroll_depth,");
            println!("              mouse_movement_intensity, answer_count,");
            println!("              scrolled_before_first_click }}");
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, CurioCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_events(data: &str, format: InputFormat) -> Result<Vec<InteractionEvent>, CurioCliError> {
    match format {
        InputFormat::Ndjson => {
            let mut events = Vec::new();
            for (number, line) in data.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let event: InteractionEvent = serde_json::from_str(line).map_err(|e| {
                    CurioCliError::ParseError(format!("Line {}: {}", number + 1, e))
                })?;
                events.push(event);
            }
            Ok(events)
        }
        InputFormat::Json => Ok(serde_json::from_str(data)?),
    }
}

fn load_table(path: Option<&Path>) -> Result<ArchetypeTable, CurioCliError> {
    match path {
        Some(path) => Ok(ArchetypeTable::from_json(&fs::read_to_string(path)?)?),
        None => Ok(default_archetype_table()),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_json<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<(), CurioCliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Ok,
    Error,
}

// Error types

#[derive(Debug)]
enum CurioCliError {
    Io(io::Error),
    Engine(curio_engine::EngineError),
    Json(serde_json::Error),
    NoEvents,
    DoctorFailed,
    ParseError(String),
}

impl From<io::Error> for CurioCliError {
    fn from(e: io::Error) -> Self {
        CurioCliError::Io(e)
    }
}

impl From<curio_engine::EngineError> for CurioCliError {
    fn from(e: curio_engine::EngineError) -> Self {
        CurioCliError::Engine(e)
    }
}

impl From<serde_json::Error> for CurioCliError {
    fn from(e: serde_json::Error) -> Self {
        CurioCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CurioCliError> for CliError {
    fn from(e: CurioCliError) -> Self {
        match e {
            CurioCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CurioCliError::Engine(e) => CliError {
                code: "CONTENT_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'curio doctor' on the content files".to_string()),
            },
            CurioCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CurioCliError::NoEvents => CliError {
                code: "NO_EVENTS".to_string(),
                message: "No events found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            CurioCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            CurioCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format with 'curio schema input'".to_string()),
            },
        }
    }
}
