//! daybook init command implementation
//!
//! Writes a default `.daybook.toml` and creates the data directory with an
//! empty task collection. Existing files are left alone.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;

#[derive(Serialize)]
struct InitReport {
    root: PathBuf,
    data_dir: PathBuf,
    created: InitCreated,
}

#[derive(Serialize)]
struct InitCreated {
    config: bool,
    data_dir: bool,
    tasks_file: bool,
}

pub fn run(root: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let root = super::task::resolve_root(root)?;
    if !root.is_dir() {
        return Err(Error::InvalidInput(format!(
            "daybook root is not a directory: {}",
            root.display()
        )));
    }

    let created_config = ensure_config(&root)?;
    let config = Config::load(&root.join(CONFIG_FILE))?;
    let storage = Storage::for_root(root.clone(), &config);
    let created_data_dir = !storage.data_dir().exists();
    let created_tasks_file = !storage.is_initialized();
    storage.init().map_err(Error::into_store_error)?;

    let report = InitReport {
        root: root.clone(),
        data_dir: storage.data_dir().to_path_buf(),
        created: InitCreated {
            config: created_config,
            data_dir: created_data_dir,
            tasks_file: created_tasks_file,
        },
    };

    let mut created_items = Vec::new();
    if created_config {
        created_items.push(CONFIG_FILE.to_string());
    }
    if created_data_dir {
        created_items.push(format!("{}/", config.data_dir.display()));
    }
    if created_tasks_file {
        created_items.push("tasks.jsonl".to_string());
    }

    let header = if created_items.is_empty() {
        "daybook init: nothing to do"
    } else {
        "daybook init: initialized"
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("root", root.display().to_string());
    human.push_summary(
        "created",
        if created_items.is_empty() {
            "none".to_string()
        } else {
            created_items.join(", ")
        },
    );
    human.push_next_step("daybook new \"<title>\" --date YYYY-MM-DD --start HH:mm --end HH:mm");

    emit_success(OutputOptions { json, quiet }, "init", &report, Some(&human))
}

fn ensure_config(root: &Path) -> Result<bool> {
    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() {
        if !config_path.is_file() {
            return Err(Error::InvalidConfig(format!(
                "{CONFIG_FILE} exists but is not a file: {}",
                config_path.display()
            )));
        }
        return Ok(false);
    }

    Config::default().save(&config_path)?;
    Ok(true)
}
