//! Command-line interface for daybook
//!
//! This module defines the CLI structure using clap derive macros.
//! `init` lives in its own submodule; every task command is in `task`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;

mod init;
mod task;

/// daybook - a scheduled task store with day, week and month views
#[derive(Parser, Debug)]
#[command(name = "daybook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Daybook root holding `.daybook.toml` (defaults to current directory)
    #[arg(long, global = true, env = "DAYBOOK_ROOT")]
    pub root: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Client-side filters shared by the query commands
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Case-insensitive text search over title, description, status and type
    #[arg(long)]
    pub search: Option<String>,

    /// Only this status (pending, inprogress, completed, overdue, all)
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Only this type (work, study, health, personal, other, all)
    #[arg(long = "type", default_value = "all")]
    pub kind: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create `.daybook.toml` and the data directory
    Init,

    /// Schedule a new task
    New {
        /// Task title
        title: String,

        /// Day of the task (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Start time (HH:mm)
        #[arg(long)]
        start: String,

        /// End time (HH:mm)
        #[arg(long)]
        end: String,

        #[arg(long)]
        description: Option<String>,

        /// Initial status (defaults to tasks.default_status)
        #[arg(long)]
        status: Option<String>,

        /// Category (defaults to tasks.default_type)
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Show a task by id or unique id prefix
    Show { id: String },

    /// Tasks on one day
    Day {
        /// Day to list (defaults to today)
        #[arg(long)]
        date: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Tasks in the Sunday-to-Saturday week around a date
    Week {
        /// Reference date (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Include the 7-day calendar row
        #[arg(long)]
        grid: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Tasks in a calendar month
    Month {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,

        /// Include the 42-cell calendar grid
        #[arg(long)]
        grid: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Tasks between two dates, inclusive
    Range {
        start: String,
        end: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Change fields of an existing task
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Set the status of a task
    Status { id: String, status: String },

    /// Permanently delete a task
    Delete { id: String },

    /// Status counts for a month
    Stats {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = task::CommandContext {
            root: self.root,
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Init => init::run(ctx.root, ctx.json, ctx.quiet),
            Commands::New {
                title,
                date,
                start,
                end,
                description,
                status,
                kind,
            } => task::run_new(
                ctx,
                task::NewOptions {
                    title,
                    date,
                    start,
                    end,
                    description,
                    status,
                    kind,
                },
            ),
            Commands::Show { id } => task::run_show(ctx, task::ShowOptions { id }),
            Commands::Day { date, filter } => task::run_day(ctx, task::DayOptions { date, filter }),
            Commands::Week { date, grid, filter } => {
                task::run_week(ctx, task::WeekOptions { date, grid, filter })
            }
            Commands::Month {
                year,
                month,
                grid,
                filter,
            } => task::run_month(
                ctx,
                task::MonthOptions {
                    year,
                    month,
                    grid,
                    filter,
                },
            ),
            Commands::Range { start, end, filter } => {
                task::run_range(ctx, task::RangeOptions { start, end, filter })
            }
            Commands::Edit {
                id,
                title,
                description,
                date,
                start,
                end,
                status,
                kind,
            } => task::run_edit(
                ctx,
                task::EditOptions {
                    id,
                    title,
                    description,
                    date,
                    start,
                    end,
                    status,
                    kind,
                },
            ),
            Commands::Status { id, status } => {
                task::run_status(ctx, task::StatusOptions { id, status })
            }
            Commands::Delete { id } => task::run_delete(ctx, task::DeleteOptions { id }),
            Commands::Stats {
                year,
                month,
                filter,
            } => task::run_stats(ctx, task::StatsOptions {
                year,
                month,
                filter,
            }),
        }
    }
}
