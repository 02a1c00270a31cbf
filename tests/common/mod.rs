#![allow(dead_code)]

use itemdesk::config::Config;
use itemdesk::db::DbActorHandle;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// A throwaway SQLite file; the file and its WAL siblings are removed on drop.
pub struct TempDb {
    pub path: PathBuf,
    pub url: String,
}

impl TempDb {
    pub fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "itemdesk-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        let url = format!("sqlite:{}", path.display());
        Self { path, url }
    }

    pub async fn spawn(&self) -> DbActorHandle {
        let cfg = Config::default();
        itemdesk::db::spawn(&self.url, &cfg.database)
            .await
            .expect("failed to spawn DbActor")
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let base = self.path.to_string_lossy().to_string();
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{base}{suffix}"));
        }
    }
}
