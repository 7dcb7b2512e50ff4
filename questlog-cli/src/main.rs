use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use questlog_core::time::{parse_date, parse_time, parse_tz, today_in};
use questlog_core::{SessionState, Task, UpdateOutcome};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod calendar;
mod config;
mod hud;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "questlog",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("QUESTLOG_BUILD_SHA"), ")"),
    about = "Gamified quest log: XP, streaks and bosses for your to-do list"
)]
struct Cli {
    /// Data directory (default: ~/.questlog)
    #[arg(long, global = true, env = "QUESTLOG_HOME")]
    home: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a fresh session with the starter quest
    Init {
        /// Overwrite an existing session
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Level, streak, XP progress and the current boss
    Status,

    /// Show the quest log
    List,

    /// Add a quest
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "09:00")]
        start: String,

        #[arg(long, default_value = "10:00")]
        end: String,

        #[arg(long, default_value = questlog_core::DEFAULT_TASK_COLOR)]
        color: String,
    },

    /// Mark quest N done
    Done { n: usize },

    /// Mark quest N not done
    Undo { n: usize },

    /// Delete quest N
    Remove { n: usize },

    /// Summon or flee from a boss
    Boss {
        #[command(subcommand)]
        command: BossCommand,
    },

    /// Export the session to a save file
    Save {
        /// Output path (default: ./questlog_<today>.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace the session with a save file
    Load { file: PathBuf },

    /// Calendar export
    Calendar {
        #[command(subcommand)]
        command: CalendarCommand,
    },

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum BossCommand {
    /// Summon a boss (one at a time)
    Summon {
        #[arg(long)]
        name: Option<String>,

        /// 50..=500
        #[arg(long)]
        hp: Option<i64>,

        #[arg(long)]
        icon: Option<String>,
    },

    /// Abandon the current boss, no reward
    Flee,
}

#[derive(Subcommand, Debug)]
enum CalendarCommand {
    /// Write all quests as an ICS calendar (stdout unless --out)
    ExportIcs {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write default config.toml if missing
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "questlog=debug,questlog_core=debug,info"
    } else {
        "questlog=info,questlog_core=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let home = state::questlog_home(cli.home)?;
    state::ensure_home(&home)?;
    let cfg = config::load_config(&home)?;
    let tz = parse_tz(&cfg.calendar.timezone)?;
    let today = today_in(tz, Utc::now());
    tracing::debug!(home = %home.display(), %today, "resolved session");

    match cli.command {
        Command::Init { force } => init(&home, today, force)?,
        Command::Status => {
            let session = state::load_session(&home, today)?;
            print_status(&session, today);
        }
        Command::List => {
            let session = state::load_session(&home, today)?;
            println!("{}", hud::render_tasks(&session.tasks));
        }
        Command::Add {
            title,
            description,
            date,
            start,
            end,
            color,
        } => {
            let date = match date {
                Some(d) => parse_date(&d).with_context(|| format!("invalid date '{d}' (YYYY-MM-DD)"))?,
                None => today,
            };
            let start = parse_time(&start).with_context(|| format!("invalid start '{start}' (HH:MM)"))?;
            let end = parse_time(&end).with_context(|| format!("invalid end '{end}' (HH:MM)"))?;
            let task = Task::new(title, date)
                .with_description(description)
                .with_times(start, end)
                .with_color(color);

            update(&home, today, |s| Ok(s.with_task_added(task)?))?;
            println!("Added!");
        }
        Command::Done { n } => update(&home, today, |s| Ok(s.with_completion(row(n)?, true)?))?,
        Command::Undo { n } => update(&home, today, |s| Ok(s.with_completion(row(n)?, false)?))?,
        Command::Remove { n } => update(&home, today, |s| Ok(s.with_task_removed(row(n)?)?))?,
        Command::Boss { command } => boss(&home, today, &cfg, command)?,
        Command::Save { out } => {
            let session = state::load_session(&home, today)?;
            let out = out.unwrap_or_else(|| PathBuf::from(format!("questlog_{today}.json")));
            let json = session.to_save_json().context("serialize session")?;
            fs::write(&out, json).with_context(|| format!("write {}", out.display()))?;
            println!("📥 Saved game to {}", out.display());
        }
        Command::Load { file } => {
            // A damaged session file must not block restoring a good save.
            let mut session = state::load_session(&home, today).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable session: {e:#}");
                SessionState::fresh(today)
            });
            let json = fs::read_to_string(&file).with_context(|| format!("read {}", file.display()))?;
            let fallen = match session.restore_from_json(&json) {
                Ok(fallen) => fallen,
                Err(e) => bail!("Corrupt save file: {e}"),
            };
            state::write_session(&home, &session)?;
            println!("✅ Save file loaded successfully!");
            if let Some(b) = fallen {
                println!(
                    "🏆 {} was already beaten! +{} XP",
                    b.name, session.rules.boss_bonus_xp
                );
            }
            print_status(&session, today);
        }
        Command::Calendar { command } => match command {
            CalendarCommand::ExportIcs { out } => {
                let session = state::load_session(&home, today)?;
                let events = calendar::tasks_to_events(&session.tasks, tz)?;
                let ics = calendar::events_to_ics(&events, Utc::now());
                match out {
                    Some(p) => {
                        fs::write(&p, ics).with_context(|| format!("write {}", p.display()))?;
                        println!("Wrote {} events to {}", events.len(), p.display());
                    }
                    None => print!("{ics}"),
                }
            }
        },
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&home)?,
        },
    }

    Ok(())
}

/// 1-based quest number to row index.
fn row(n: usize) -> Result<usize> {
    n.checked_sub(1).context("quest numbers start at 1")
}

fn init(home: &Path, today: NaiveDate, force: bool) -> Result<()> {
    let p = state::session_path(home);
    if p.exists() && !force {
        bail!("session already exists at {} (pass --force to start over)", p.display());
    }
    let session = SessionState::fresh(today);
    state::write_session(home, &session)?;
    println!("New quest log at {}", p.display());
    print_status(&session, today);
    Ok(())
}

/// Load, build the next task snapshot, run the update cycle, save.
fn update<F>(home: &Path, today: NaiveDate, next: F) -> Result<()>
where
    F: FnOnce(&SessionState) -> Result<Vec<Task>>,
{
    let mut session = state::load_session(home, today)?;
    let tasks = next(&session)?;
    let outcome = session.apply_tasks(tasks);
    state::write_session(home, &session)?;
    print_outcome(&outcome);
    Ok(())
}

fn boss(home: &Path, today: NaiveDate, cfg: &Config, command: BossCommand) -> Result<()> {
    let mut session = state::load_session(home, today)?;
    match command {
        BossCommand::Summon { name, hp, icon } => {
            let name = name.unwrap_or_else(|| cfg.boss.default_name.clone());
            let hp = hp.unwrap_or(cfg.boss.default_hp);
            let icon = icon.unwrap_or_else(|| cfg.boss.default_icon.clone());
            let boss = session.summon_boss(name, hp, icon)?;
            println!("{}", hud::render_boss(boss));
        }
        BossCommand::Flee => match session.flee() {
            Some(b) => println!("You fled from {}.", b.name),
            None => println!("No boss to flee from."),
        },
    }
    state::write_session(home, &session)?;
    Ok(())
}

fn print_status(session: &SessionState, today: NaiveDate) {
    println!("{}", hud::render_hud(&session.stats(), session.streak(today)));
    if let Some(b) = &session.active_boss {
        println!("\n{}", hud::render_boss(b));
    }
}

fn print_outcome(outcome: &UpdateOutcome) {
    for msg in hud::outcome_messages(outcome) {
        println!("{msg}");
    }
}
