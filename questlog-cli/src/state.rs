use anyhow::{Context, Result};
use chrono::NaiveDate;
use questlog_core::SessionState;
use std::fs;
use std::path::{Path, PathBuf};

/// `--home` / `QUESTLOG_HOME` if given, otherwise `~/.questlog`.
pub fn questlog_home(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".questlog"))
}

pub fn ensure_home(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}

pub fn session_path(home: &Path) -> PathBuf {
    home.join("session.json")
}

/// The saved session, or a fresh one with the starter quest.
pub fn load_session(home: &Path, today: NaiveDate) -> Result<SessionState> {
    let p = session_path(home);
    if !p.exists() {
        tracing::debug!(path = %p.display(), "no session file, starting fresh");
        return Ok(SessionState::fresh(today));
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let session = questlog_core::from_save_json(&s)
        .with_context(|| format!("parse {}", p.display()))?;
    Ok(session)
}

/// Write through a temp file so an interrupted write keeps the old session.
pub fn write_session(home: &Path, session: &SessionState) -> Result<()> {
    ensure_home(home)?;
    let p = session_path(home);
    let tmp = p.with_extension("json.tmp");
    let json = session.to_save_json().context("serialize session")?;
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, &p).with_context(|| format!("rename {} -> {}", tmp.display(), p.display()))?;
    Ok(())
}
