use anyhow::{Context, Result};
use questlog_core::{DEFAULT_BOSS_HP, DEFAULT_BOSS_ICON, DEFAULT_BOSS_NAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub boss: BossSection,
    pub calendar: CalendarSection,
}

/// Defaults for `questlog boss summon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossSection {
    pub default_name: String,
    pub default_hp: i64,
    pub default_icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSection {
    /// IANA timezone used for "today" and for calendar export.
    pub timezone: String,
}

impl Default for BossSection {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_BOSS_NAME.to_string(),
            default_hp: DEFAULT_BOSS_HP,
            default_icon: DEFAULT_BOSS_ICON.to_string(),
        }
    }
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
        }
    }
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

pub fn load_config(home: &Path) -> Result<Config> {
    let p = config_path(home);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(home: &Path, cfg: &Config) -> Result<()> {
    let p = config_path(home);
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(home: &Path) -> Result<()> {
    let p = config_path(home);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(home, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.boss.default_hp, 100);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(config_path(dir.path()), "[calendar]\ntimezone = \"Europe/Berlin\"\n").unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg.calendar.timezone, "Europe/Berlin");
        assert_eq!(cfg.boss.default_name, DEFAULT_BOSS_NAME);
    }

    #[test]
    fn init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path()).unwrap();
        assert_eq!(load_config(dir.path()).unwrap(), Config::default());
    }
}
