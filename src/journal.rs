use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

pub const ANALYZER_DIR: &str = "etsmart-analyzer";

fn day_stamp() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Where journal and budget state live: the `ANALYSES_DIR` env override
/// wins, then `analyses/` under the enclosing git checkout, then a
/// relative `analyses/` as the last resort.
pub fn resolve_analyses_dir() -> PathBuf {
    let base = match std::env::var("ANALYSES_DIR") {
        Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
        _ => repo_root()
            .map(|root| root.join("analyses"))
            .unwrap_or_else(|| PathBuf::from("analyses")),
    };
    base.join(ANALYZER_DIR)
}

fn repo_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").is_dir())
        .map(Path::to_path_buf)
}

/// Append-only JSONL log of analysis lifecycle events, one file per day.
///
/// Writes are best-effort: a failed write is logged and swallowed so the
/// journal can never fail an analysis.
pub struct AnalysisJournal {
    dir: PathBuf,
    day: String,
    file: Option<File>,
}

impl AnalysisJournal {
    pub fn open(dir: PathBuf) -> std::io::Result<Self> {
        create_dir_all(&dir)?;
        Ok(Self {
            dir,
            day: String::new(),
            file: None,
        })
    }

    /// Stamps `kind` and the current time onto `payload` and appends it
    /// as one JSONL line.
    pub fn write_event(&mut self, kind: &str, mut payload: Value) {
        if let Some(fields) = payload.as_object_mut() {
            let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            fields.insert("ts".to_string(), json!(ts));
            fields.insert("kind".to_string(), json!(kind));
        }
        if let Err(e) = self.append(&payload) {
            tracing::warn!("journal write failed: {}", e);
        }
    }

    fn append(&mut self, event: &Value) -> std::io::Result<()> {
        let today = day_stamp();
        if self.day != today || self.file.is_none() {
            let path = self.dir.join(format!("analyses-{}.jsonl", today));
            self.file = Some(OpenOptions::new().create(true).append(true).open(path)?);
            self.day = today;
        }
        if let Some(file) = self.file.as_mut() {
            serde_json::to_writer(&mut *file, event)?;
            writeln!(file)?;
            file.flush()?;
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
