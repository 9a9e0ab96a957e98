//! Survey CLI - Command-line interface for Synheart Survey
//!
//! Commands:
//! - run: Run an interactive trial in the terminal
//! - simulate: Replay a scripted trial against a manual clock
//! - validate: Validate a survey configuration
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use synheart_survey::clock::ManualClock;
use synheart_survey::normalizer::{QuestionNormalizer, ThreadRngRandomizer};
use synheart_survey::{
    IgnoreReason, Outcome, PageSnapshot, SurveyConfig, SurveyController, SurveyError, SurveyResult,
    TrialReport, ViewState, AUTO_ADVANCE_DELAY_MS, ENGINE_VERSION,
};

/// Survey - Paged likert questionnaire engine
#[derive(Parser)]
#[command(name = "survey")]
#[command(author = "Synheart AI Inc")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Run paged likert questionnaires and collect timed responses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive trial in the terminal
    Run {
        /// Survey configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Output file path for the trial report (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// Replay a scripted trial against a manual clock
    Simulate {
        /// Survey configuration file (use - for stdin)
        #[arg(short, long)]
        config: PathBuf,

        /// Script file with timestamped commands (use - for stdin)
        #[arg(short, long)]
        script: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// Validate a survey configuration
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (survey.config.v1)
    Input,
    /// Output schema (survey.result.v1)
    Output,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

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

fn run(cli: Cli) -> Result<(), SurveyCliError> {
    match cli.command {
        Commands::Run { config, output } => cmd_run(&config, &output),

        Commands::Simulate {
            config,
            script,
            output,
        } => cmd_simulate(&config, &script, &output),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn cmd_run(config_path: &Path, output: &Path) -> Result<(), SurveyCliError> {
    if config_path.to_string_lossy() == "-" {
        return Err(SurveyCliError::ParseError(
            "run reads keyboard input; pass the configuration as a file path".to_string(),
        ));
    }
    if !atty::is(atty::Stream::Stdin) {
        return Err(SurveyCliError::NotInteractive);
    }

    let config: SurveyConfig = serde_json::from_str(&fs::read_to_string(config_path)?)?;
    let mut controller = SurveyController::new(config)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let result = loop {
        let snapshot = match controller.view_state() {
            ViewState::Page(snapshot) => snapshot,
            ViewState::Finished => break None,
        };
        render_page(&snapshot)?;

        let Some(line) = lines.next() else {
            return Err(SurveyCliError::InputClosed);
        };
        let line = line?;
        let input = line.trim();

        let outcome = if input.is_empty() {
            controller.on_advance_requested()
        } else if input.eq_ignore_ascii_case("b") {
            controller.on_retreat_requested()
        } else if let Ok(choice) = input.parse::<usize>() {
            if choice == 0 || choice > snapshot.labels.len() {
                println!("(choose a number between 1 and {})", snapshot.labels.len());
                continue;
            }
            controller.on_select(&snapshot.name, choice - 1)
        } else {
            println!("(enter an option number, b, or press enter to continue)");
            continue;
        };

        match outcome {
            Outcome::Finished(result) => break Some(result),
            Outcome::Ignored(IgnoreReason::NoSelection) => {
                println!("(select an option before continuing)");
            }
            Outcome::Recorded if controller.pending_advance_at().is_some() => {
                // Let the auto-advance deadline elapse, then fire it.
                thread::sleep(Duration::from_millis(AUTO_ADVANCE_DELAY_MS));
                if let Some(Outcome::Finished(result)) = controller.tick() {
                    break Some(result);
                }
            }
            _ => {}
        }
    };

    let Some(result) = result else {
        return Err(SurveyCliError::ParseError(
            "trial ended without a result".to_string(),
        ));
    };

    let report = TrialReport::from_result(result);
    let mut report_json = serde_json::to_string_pretty(&report)?;
    report_json.push('\n');
    write_output(output, &report_json)
}

fn cmd_simulate(
    config_path: &Path,
    script_path: &Path,
    output: &Path,
) -> Result<(), SurveyCliError> {
    if config_path.to_string_lossy() == "-" && script_path.to_string_lossy() == "-" {
        return Err(SurveyCliError::ParseError(
            "config and script cannot both come from stdin".to_string(),
        ));
    }

    let config: SurveyConfig = serde_json::from_str(&read_input(config_path)?)?;
    let steps: Vec<ScriptStep> = serde_json::from_str(&read_input(script_path)?)?;

    let clock = ManualClock::new();
    let mut randomizer = ThreadRngRandomizer;
    let mut controller =
        SurveyController::with_services(config, Box::new(clock.clone()), &mut randomizer)?;

    let mut records: Vec<StepRecord> = Vec::with_capacity(steps.len());
    let mut finished: Option<SurveyResult> = None;

    for step in steps {
        clock.set(step.at_ms);
        let outcome = match step.action {
            ScriptAction::Select { option } => match controller.view_state() {
                ViewState::Page(snapshot) => Some(controller.on_select(&snapshot.name, option)),
                ViewState::Finished => Some(Outcome::Ignored(IgnoreReason::TrialComplete)),
            },
            ScriptAction::Advance => Some(controller.on_advance_requested()),
            ScriptAction::Retreat => Some(controller.on_retreat_requested()),
            ScriptAction::Tick => controller.tick(),
        };

        if let Some(Outcome::Finished(result)) = &outcome {
            finished = Some(result.clone());
        }
        records.push(StepRecord {
            at_ms: step.at_ms,
            outcome,
        });
    }

    let report = SimulationReport {
        total_steps: records.len(),
        completed: finished.is_some(),
        steps: records,
        result: finished,
    };

    let mut report_json = serde_json::to_string_pretty(&report)?;
    report_json.push('\n');
    write_output(output, &report_json)
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), SurveyCliError> {
    let config: SurveyConfig = serde_json::from_str(&read_input(input)?)?;

    let generated_names = config
        .questions
        .iter()
        .filter(|q| q.name.is_empty())
        .count();

    let mut issues: Vec<ValidationIssue> = Vec::new();
    if config.questions.is_empty() {
        issues.push(ValidationIssue {
            question: None,
            message: "survey has no questions".to_string(),
        });
    }

    // Preview name normalization so issues name questions the way the
    // engine will.
    let mut questions = config.questions.clone();
    QuestionNormalizer::normalize_names(&mut questions);

    let mut seen: HashSet<&str> = HashSet::new();
    for (idx, question) in questions.iter().enumerate() {
        if question.labels.is_empty() {
            issues.push(ValidationIssue {
                question: Some(idx),
                message: format!("'{}' has no response labels", question.name),
            });
        }
        if !seen.insert(question.name.as_str()) {
            issues.push(ValidationIssue {
                question: Some(idx),
                message: format!("duplicate question name '{}'", question.name),
            });
        }
    }

    let report = ValidationReport {
        total_questions: config.questions.len(),
        generated_names,
        issues,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total questions: {}", report.total_questions);
        println!("Generated names: {}", report.generated_names);
        println!("Issues:          {}", report.issues.len());

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                match issue.question {
                    Some(idx) => println!("  - Question {}: {}", idx, issue.message),
                    None => println!("  - {}", issue.message),
                }
            }
        }
    }

    if report.issues.is_empty() {
        Ok(())
    } else {
        Err(SurveyCliError::ValidationFailed(report.issues.len()))
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), SurveyCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input Schema: survey.config.v1");
                println!();
                println!("A survey configuration contains:");
                println!();
                println!("- questions (required, non-empty): array of");
                println!("  - prompt: question text");
                println!("  - labels: ordered scale labels, one per option");
                println!("  - required: declarative flag (default false)");
                println!("  - name: response key, auto-generated 'q<N>' when empty");
                println!("  - reverse: reverse the value mapping (default false)");
                println!("- randomize_question_order: shuffle pages at start (default false)");
                println!("- allow_backward: permit the back control (default true)");
                println!("- zero_indexed: map values to 0..k-1 instead of 1..k (default false)");
                println!("- page_label: progress label (default \"Question\")");
                println!("- button_label_previous / button_label_next: control captions");
                println!("- autoadvance: advance shortly after a selection (default false)");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output Schema: survey.result.v1");
                println!();
                println!("A completed trial produces:");
                println!();
                println!("- responses: one record per answered question, in presentation order");
                println!("  - name, item_pos, resp_pos, resp");
                println!("- view_history: one entry per page transition, append-only");
                println!("  - page_index, viewing_time, events [{{ target, rt }}]");
                println!("- rt: total elapsed milliseconds from trial start to completion");
                println!();
                println!("'survey run' and 'survey simulate' wrap this record in a trial");
                println!("report with producer, engine_version, trial_id, and timestamps.");
            }
        }
    }

    Ok(())
}

fn render_page(snapshot: &PageSnapshot) -> Result<(), SurveyCliError> {
    println!();
    println!("{}", snapshot.progress);
    println!("{}", snapshot.prompt);
    for (pos, label) in snapshot.labels.iter().enumerate() {
        let marker = if snapshot.selected == Some(pos) {
            '>'
        } else {
            ' '
        };
        println!("  {marker} {}) {label}", pos + 1);
    }

    if snapshot.back_enabled {
        print!(
            "[1-{}] select, [b] {}, [enter] {}: ",
            snapshot.labels.len(),
            snapshot.previous_label,
            snapshot.next_label
        );
    } else {
        print!(
            "[1-{}] select, [enter] {}: ",
            snapshot.labels.len(),
            snapshot.next_label
        );
    }
    io::stdout().flush()?;
    Ok(())
}

// Helper functions

fn read_input(path: &Path) -> Result<String, SurveyCliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn write_output(path: &Path, data: &str) -> Result<(), SurveyCliError> {
    if path.to_string_lossy() == "-" {
        print!("{data}");
        Ok(())
    } else {
        Ok(fs::write(path, data)?)
    }
}

fn get_input_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://synheart.ai/schemas/survey.config.v1.json",
        "title": "survey.config.v1",
        "description": "Synheart survey trial configuration schema",
        "type": "object",
        "required": ["questions"],
        "properties": {
            "questions": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["prompt", "labels"],
                    "properties": {
                        "prompt": { "type": "string" },
                        "labels": { "type": "array", "items": { "type": "string" } },
                        "required": { "type": "boolean", "default": false },
                        "name": { "type": "string", "default": "" },
                        "reverse": { "type": "boolean", "default": false }
                    }
                }
            },
            "randomize_question_order": { "type": "boolean", "default": false },
            "allow_backward": { "type": "boolean", "default": true },
            "zero_indexed": { "type": "boolean", "default": false },
            "page_label": { "type": "string", "default": "Question" },
            "button_label_previous": { "type": "string", "default": "Previous" },
            "button_label_next": { "type": "string", "default": "Next" },
            "autoadvance": { "type": "boolean", "default": false }
        }
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://synheart.ai/schemas/survey.result.v1.json",
        "title": "survey.result.v1",
        "description": "Synheart survey trial result schema",
        "type": "object",
        "required": ["responses", "view_history", "rt"],
        "properties": {
            "responses": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "item_pos", "resp_pos", "resp"],
                    "properties": {
                        "name": { "type": "string" },
                        "item_pos": { "type": "integer", "minimum": 0 },
                        "resp_pos": { "type": "integer", "minimum": 0 },
                        "resp": { "type": "integer", "minimum": 0 }
                    }
                }
            },
            "view_history": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["page_index", "viewing_time", "events"],
                    "properties": {
                        "page_index": { "type": "integer", "minimum": 0 },
                        "viewing_time": { "type": "integer", "minimum": 0 },
                        "events": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["target", "rt"],
                                "properties": {
                                    "target": { "type": "string" },
                                    "rt": { "type": "integer", "minimum": 0 }
                                }
                            }
                        }
                    }
                }
            },
            "rt": { "type": "integer", "minimum": 0 }
        }
    })
    .to_string()
}

// Script types

#[derive(serde::Deserialize)]
struct ScriptStep {
    /// Manual clock reading when the command is applied
    at_ms: u64,
    #[serde(flatten)]
    action: ScriptAction,
}

#[derive(serde::Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ScriptAction {
    /// Select an option on the active page
    Select { option: usize },
    Advance,
    Retreat,
    Tick,
}

// Error types

#[derive(Debug)]
enum SurveyCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Survey(SurveyError),
    NotInteractive,
    InputClosed,
    ValidationFailed(usize),
    ParseError(String),
}

impl From<io::Error> for SurveyCliError {
    fn from(e: io::Error) -> Self {
        SurveyCliError::Io(e)
    }
}

impl From<serde_json::Error> for SurveyCliError {
    fn from(e: serde_json::Error) -> Self {
        SurveyCliError::Json(e)
    }
}

impl From<SurveyError> for SurveyCliError {
    fn from(e: SurveyError) -> Self {
        SurveyCliError::Survey(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<SurveyCliError> for CliError {
    fn from(e: SurveyCliError) -> Self {
        match e {
            SurveyCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            SurveyCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax against 'survey schema input'".to_string()),
            },
            SurveyCliError::Survey(e) => CliError {
                code: "SURVEY_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'survey validate' for details".to_string()),
            },
            SurveyCliError::NotInteractive => CliError {
                code: "NOT_INTERACTIVE".to_string(),
                message: "stdin is not a terminal".to_string(),
                hint: Some("Use 'survey simulate' for scripted input".to_string()),
            },
            SurveyCliError::InputClosed => CliError {
                code: "INPUT_CLOSED".to_string(),
                message: "input ended before the trial completed".to_string(),
                hint: None,
            },
            SurveyCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} configuration issues found", count),
                hint: Some("Fix the reported issues and retry".to_string()),
            },
            SurveyCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_questions: usize,
    generated_names: usize,
    issues: Vec<ValidationIssue>,
}

#[derive(serde::Serialize)]
struct ValidationIssue {
    question: Option<usize>,
    message: String,
}

#[derive(serde::Serialize)]
struct SimulationReport {
    total_steps: usize,
    completed: bool,
    steps: Vec<StepRecord>,
    result: Option<SurveyResult>,
}

#[derive(serde::Serialize)]
struct StepRecord {
    at_ms: u64,
    /// `None` when a tick had no due deadline
    outcome: Option<Outcome>,
}
