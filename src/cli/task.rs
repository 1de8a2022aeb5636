//! daybook task command implementations.

use std::path::PathBuf;

use chrono::{Datelike, Local};
use serde::Serialize;

use crate::calendar::{self, CalendarDay};
use crate::cli::FilterArgs;
use crate::command::TaskCommandService;
use crate::config::{Config, CONFIG_FILE};
use crate::error::Result;
use crate::filter::{Choice, TaskFilter};
use crate::output::{
    emit_success, schedule_warning, short_id, task_line, HumanOutput, OutputOptions,
};
use crate::query::{TaskQueryService, WindowedTasks};
use crate::stats::StatusCounts;
use crate::store::TaskStore;
use crate::task::{NewTask, Task, TaskDate, TaskPatch, TaskStatus, TaskType};
use crate::window::DateWindow;

/// Global flags every command receives
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

impl CommandContext {
    fn output(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }

    /// Open the store. An unreadable or invalid `.daybook.toml` is an error
    /// here rather than a silent fallback to defaults.
    fn open_store(&self) -> Result<TaskStore> {
        let root = resolve_root(self.root.clone())?;
        let config_path = root.join(CONFIG_FILE);
        let config = if config_path.exists() {
            Config::load(&config_path)?
        } else {
            Config::default()
        };
        Ok(TaskStore::with_config(root, &config))
    }
}

pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?),
    }
}

pub struct NewOptions {
    pub title: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub kind: Option<String>,
}

pub struct ShowOptions {
    pub id: String,
}

pub struct DayOptions {
    pub date: Option<String>,
    pub filter: FilterArgs,
}

pub struct WeekOptions {
    pub date: Option<String>,
    pub grid: bool,
    pub filter: FilterArgs,
}

pub struct MonthOptions {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub grid: bool,
    pub filter: FilterArgs,
}

pub struct RangeOptions {
    pub start: String,
    pub end: String,
    pub filter: FilterArgs,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<String>,
    pub kind: Option<String>,
}

pub struct StatusOptions {
    pub id: String,
    pub status: String,
}

pub struct DeleteOptions {
    pub id: String,
}

pub struct StatsOptions {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub filter: FilterArgs,
}

/// Query result after client-side filtering.
#[derive(Serialize)]
struct QueryOutput {
    window: DateWindow,
    /// Tasks in the window before filtering
    matched: usize,
    tasks: Vec<Task>,
    counts: StatusCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<Vec<CalendarDay>>,
}

impl QueryOutput {
    fn filtered(result: WindowedTasks, filter: &TaskFilter) -> Self {
        let matched = result.tasks.len();
        let tasks: Vec<Task> = filter.apply(&result.tasks).into_iter().cloned().collect();
        let counts = StatusCounts::from_tasks(&tasks);
        Self {
            window: result.window,
            matched,
            tasks,
            counts,
            days: None,
        }
    }
}

#[derive(Serialize)]
struct StatsOutput {
    window: DateWindow,
    counts: StatusCounts,
}

pub fn run_new(ctx: CommandContext, options: NewOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let mut fields = NewTask::new(options.title, options.date, options.start, options.end);
    fields.description = options.description;
    fields.status = options.status;
    fields.kind = options.kind;

    let task = TaskCommandService::new(&store).create(fields)?;

    let mut human = HumanOutput::new("Task created");
    push_task_summary(&mut human, &task);
    if let Some(warning) = schedule_warning(&task) {
        human.push_warning(warning);
    }
    human.push_next_step(format!("daybook day --date {}", task.date));

    emit_success(ctx.output(), "new", &task, Some(&human))
}

pub fn run_show(ctx: CommandContext, options: ShowOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let resolved = store.resolve_id(&options.id)?;
    let task = store.get_by_id(&resolved)?;

    let mut human = HumanOutput::new(format!("Task {}", task.id));
    push_task_summary(&mut human, &task);

    emit_success(ctx.output(), "show", &task, Some(&human))
}

pub fn run_day(ctx: CommandContext, options: DayOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let date = options.date.unwrap_or_else(today);
    let filter = build_filter(&options.filter)?;
    let result = TaskQueryService::new(&store).tasks_for_date(&date)?;

    let header = format!("Day {}", result.window.start);
    emit_query(&ctx, "day", header, QueryOutput::filtered(result, &filter), &filter)
}

pub fn run_week(ctx: CommandContext, options: WeekOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let reference = TaskDate::parse(&options.date.unwrap_or_else(today))?;
    let filter = build_filter(&options.filter)?;
    let result = TaskQueryService::new(&store).tasks_for_week(reference.as_str())?;

    let header = format!("Week {} .. {}", result.window.start, result.window.end);
    let mut output = QueryOutput::filtered(result, &filter);
    if options.grid {
        output.days = Some(calendar::week_calendar(&reference, &output.tasks)?);
    }
    emit_query(&ctx, "week", header, output, &filter)
}

pub fn run_month(ctx: CommandContext, options: MonthOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let (year, month) = month_or_current(options.year, options.month);
    let filter = build_filter(&options.filter)?;
    let result = TaskQueryService::new(&store).tasks_for_month(year, month)?;

    let header = format!("Month {year:04}-{month:02}");
    let mut output = QueryOutput::filtered(result, &filter);
    if options.grid {
        output.days = Some(calendar::month_calendar(year, month, &output.tasks)?);
    }
    emit_query(&ctx, "month", header, output, &filter)
}

pub fn run_range(ctx: CommandContext, options: RangeOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let filter = build_filter(&options.filter)?;
    let result = TaskQueryService::new(&store).tasks_for_range(&options.start, &options.end)?;

    let header = format!("Range {} .. {}", result.window.start, result.window.end);
    emit_query(&ctx, "range", header, QueryOutput::filtered(result, &filter), &filter)
}

pub fn run_edit(ctx: CommandContext, options: EditOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let resolved = store.resolve_id(&options.id)?;
    let patch = TaskPatch {
        title: options.title,
        description: options.description,
        date: options.date,
        start_time: options.start,
        end_time: options.end,
        status: options.status,
        kind: options.kind,
    };

    let task = TaskCommandService::new(&store).update(&resolved, &patch)?;

    let mut human = HumanOutput::new("Task updated");
    push_task_summary(&mut human, &task);
    if let Some(warning) = schedule_warning(&task) {
        human.push_warning(warning);
    }

    emit_success(ctx.output(), "edit", &task, Some(&human))
}

pub fn run_status(ctx: CommandContext, options: StatusOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let status: TaskStatus = options.status.parse()?;
    let resolved = store.resolve_id(&options.id)?;

    let task = TaskCommandService::new(&store).set_status(&resolved, status)?;

    let mut human = HumanOutput::new("Task status updated");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Status", task.status.to_string());

    emit_success(ctx.output(), "status", &task, Some(&human))
}

pub fn run_delete(ctx: CommandContext, options: DeleteOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let resolved = store.resolve_id(&options.id)?;

    let ack = TaskCommandService::new(&store).delete(&resolved)?;

    let mut human = HumanOutput::new(ack.message.clone());
    human.push_summary("ID", ack.id.clone());

    emit_success(ctx.output(), "delete", &ack, Some(&human))
}

pub fn run_stats(ctx: CommandContext, options: StatsOptions) -> Result<()> {
    let store = ctx.open_store()?;
    let (year, month) = month_or_current(options.year, options.month);
    let filter = build_filter(&options.filter)?;
    let result = TaskQueryService::new(&store).tasks_for_month(year, month)?;
    let counts = StatusCounts::from_tasks(filter.apply(&result.tasks));

    let mut human = HumanOutput::new(format!("Stats {year:04}-{month:02}"));
    human.push_summary("Total", counts.total.to_string());
    for status in TaskStatus::ALL {
        human.push_summary(status.as_str(), counts.get(status).to_string());
    }

    let output = StatsOutput {
        window: result.window,
        counts,
    };
    emit_success(ctx.output(), "stats", &output, Some(&human))
}

fn emit_query(
    ctx: &CommandContext,
    command: &str,
    header: String,
    output: QueryOutput,
    filter: &TaskFilter,
) -> Result<()> {
    let mut human = HumanOutput::new(header);
    human.push_summary("Tasks", output.counts.total.to_string());
    if !filter.is_noop() {
        human.push_summary("Before filter", output.matched.to_string());
    }
    for task in &output.tasks {
        human.push_detail(task_line(task));
    }
    if let Some(days) = &output.days {
        for day in days.iter().filter(|day| !day.tasks.is_empty()) {
            let marker = if day.in_month { "" } else { " (outside month)" };
            human.push_detail(format!("{}{}: {} task(s)", day.date, marker, day.tasks.len()));
        }
    }
    if output.window.start > output.window.end {
        human.push_warning(format!(
            "start {} is after end {}; nothing can match",
            output.window.start, output.window.end
        ));
    }
    if output.tasks.is_empty() {
        human.push_next_step("daybook new \"<title>\" --date YYYY-MM-DD --start HH:mm --end HH:mm");
    }

    emit_success(ctx.output(), command, &output, Some(&human))
}

fn build_filter(args: &FilterArgs) -> Result<TaskFilter> {
    let status: Choice<TaskStatus> = args.status.parse()?;
    let kind: Choice<TaskType> = args.kind.parse()?;
    let filter = TaskFilter::new().with_status(status).with_kind(kind);
    Ok(match args.search.as_deref() {
        Some(query) => filter.with_search(query),
        None => filter,
    })
}

fn push_task_summary(human: &mut HumanOutput, task: &Task) {
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    if !task.description.is_empty() {
        human.push_summary("Description", task.description.clone());
    }
    human.push_summary("Date", task.date.to_string());
    human.push_summary("Time", format!("{}-{}", task.start_time, task.end_time));
    human.push_summary("Status", task.status.to_string());
    human.push_summary("Type", task.kind.to_string());
    human.push_next_step(format!("daybook show {}", short_id(&task.id)));
}

fn today() -> String {
    TaskDate::from_naive(Local::now().date_naive()).to_string()
}

fn month_or_current(year: Option<i32>, month: Option<u32>) -> (i32, u32) {
    let now = Local::now().date_naive();
    (year.unwrap_or_else(|| now.year()), month.unwrap_or_else(|| now.month()))
}
