mod support;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::sync::{Arc, Barrier};
use std::thread;

use assert_cmd::cargo::cargo_bin;
use daybook::task::NewTask;
use daybook::TaskStore;

use support::TestRoot;

const WRITERS: usize = 8;

fn daybook_bin() -> PathBuf {
    cargo_bin("daybook")
}

fn spawn_new(root: &Path, title: &str) -> std::io::Result<Child> {
    Command::new(daybook_bin())
        .env_remove("DAYBOOK_ROOT")
        .arg("--root")
        .arg(root)
        .args(["-q", "new", title, "--date", "2024-03-01", "--start", "09:00", "--end", "10:00"])
        .spawn()
}

#[test]
fn concurrent_processes_do_not_lose_creates() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::new();

    let children = (0..WRITERS)
        .map(|idx| spawn_new(root.path(), &format!("writer-{idx}")))
        .collect::<std::io::Result<Vec<_>>>()?;
    for mut child in children {
        assert!(child.wait()?.success());
    }

    let tasks = root.read_tasks()?;
    assert_eq!(tasks.len(), WRITERS);
    let titles: HashSet<String> = tasks.into_iter().map(|task| task.title).collect();
    for idx in 0..WRITERS {
        assert!(titles.contains(&format!("writer-{idx}")));
    }
    Ok(())
}

#[test]
fn concurrent_threads_keep_every_record_and_unique_ids() {
    let root = TestRoot::new();
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|idx| {
            let barrier = Arc::clone(&barrier);
            let path = root.path().to_path_buf();
            thread::spawn(move || {
                let store = TaskStore::open(path);
                barrier.wait();
                store
                    .create(NewTask::new(
                        format!("thread-{idx}"),
                        "2024-03-02",
                        "08:00",
                        "09:00",
                    ))
                    .expect("create")
                    .id
            })
        })
        .collect();

    let ids: HashSet<String> = handles
        .into_iter()
        .map(|handle| handle.join().expect("join"))
        .collect();
    assert_eq!(ids.len(), WRITERS);

    let store = TaskStore::open(root.path());
    let stored = store.find_by_date("2024-03-02").expect("find");
    assert_eq!(stored.len(), WRITERS);
}
