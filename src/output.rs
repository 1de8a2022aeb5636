//! Shared output formatting for daybook CLI commands.
//!
//! `--json` prints a single envelope per invocation; otherwise a short
//! human report goes to stdout and errors go to stderr.

use serde::Serialize;

use crate::error::{Error, JsonError, Result};
use crate::task::Task;

pub const SCHEMA_VERSION: &str = "daybook.v1";

/// ULID characters shown in short ids: the 10-character timestamp plus two
/// random characters, so tasks created in the same millisecond still differ.
pub const SHORT_ID_LEN: usize = 12;

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Human-readable report for one command.
///
/// Warnings and next steps are also carried into the JSON envelope.
#[derive(Debug, Clone, Default)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    details: Vec<String>,
    warnings: Vec<String>,
    next_steps: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.next_steps.push(value.into());
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
    #[serde(skip_serializing_if = "is_empty")]
    warnings: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    next_steps: &'a [String],
}

fn is_empty(items: &&[String]) -> bool {
    items.is_empty()
}

/// One-line agenda entry: `date start-end [status/type] title (id)`
pub fn task_line(task: &Task) -> String {
    format!(
        "{} {}-{} [{}/{}] {} ({})",
        task.date,
        task.start_time,
        task.end_time,
        task.status,
        task.kind,
        task.title,
        short_id(&task.id)
    )
}

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Warning for a task whose slot ends before it starts. Such tasks are
/// stored as given.
pub fn schedule_warning(task: &Task) -> Option<String> {
    (task.end_time < task.start_time).then(|| {
        format!(
            "endTime {} is earlier than startTime {}",
            task.end_time, task.start_time
        )
    })
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data: Some(data),
            error: None,
            warnings: human.map(|h| h.warnings.as_slice()).unwrap_or_default(),
            next_steps: human.map(|h| h.next_steps.as_slice()).unwrap_or_default(),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else if !options.quiet {
        if let Some(human) = human {
            println!("{}", format_human(human));
        }
    }
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);
    if !json {
        eprintln!("error: {err}");
        if let Some(hint) = next_steps.first() {
            eprintln!("hint: {hint}");
        }
        return Ok(());
    }

    let envelope: Envelope<'_, ()> = Envelope {
        schema_version: SCHEMA_VERSION,
        command,
        status: "error",
        data: None,
        error: Some(JsonError::from(err)),
        warnings: &[],
        next_steps: &next_steps,
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = vec![output.header.clone()];

    if !output.summary.is_empty() {
        lines.push(String::new());
        lines.extend(output.summary.iter().map(|(key, value)| {
            if value.is_empty() {
                format!("  {key}")
            } else {
                format!("  {key}: {value}")
            }
        }));
    }
    for (title, items) in [
        ("Tasks", &output.details),
        ("Warnings", &output.warnings),
        ("Next steps", &output.next_steps),
    ] {
        if items.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{title}:"));
        lines.extend(items.iter().map(|item| format!("- {item}")));
    }

    lines.join("\n")
}

/// Best-effort command name for error envelopes raised before dispatch.
pub fn infer_command_name_from_args() -> String {
    infer_command_name(std::env::args().skip(1))
}

fn infer_command_name(args: impl IntoIterator<Item = String>) -> String {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--root" {
            args.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return arg;
    }
    "daybook".to_string()
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::NotFound(_) => vec!["daybook month".to_string()],
        Error::InvalidConfig(_) => vec!["fix .daybook.toml then retry".to_string()],
        Error::StoreUnavailable(_) | Error::Io(_) | Error::Json(_) | Error::LockFailed(_) => {
            vec!["check the .daybook directory then retry".to_string()]
        }
        _ => Vec::new(),
    }
}
