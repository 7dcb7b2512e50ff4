//! Plain-text rendering of the HUD, boss arena, quest log and update messages.

use questlog_core::{Boss, Stats, Task, UpdateOutcome};

const BAR_WIDTH: usize = 30;

/// `[#########.....................]` for a fraction in `[0, 1]`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn render_hud(stats: &Stats, streak: u32) -> String {
    let days = if streak == 1 { "Day" } else { "Days" };
    format!(
        "🛡️  Level {}   🔥 Streak {} {}   ✨ XP {}\nXP Progress ({} / {}) {}",
        stats.level,
        streak,
        days,
        stats.xp,
        stats.xp,
        stats.level_cap_xp,
        progress_bar(stats.progress, BAR_WIDTH)
    )
}

pub fn render_boss(boss: &Boss) -> String {
    format!(
        "{}  ⚔️  BOSS: {}\n{} HP: {} / {}",
        boss.icon,
        boss.name,
        progress_bar(boss.hp_fraction(), BAR_WIDTH),
        boss.current_hp,
        boss.max_hp
    )
}

/// Numbered rows, 1-based.
pub fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "(no quests yet; add one with `questlog add --title ...`)".to_string();
    }
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let mut line = format!(
                "{:>3}. {} {} {}  {}-{}  {}",
                i + 1,
                if t.completed { "✅" } else { "⬜" },
                t.title,
                t.color,
                t.start.format("%H:%M"),
                t.end.format("%H:%M"),
                t.date
            );
            if !t.description.is_empty() {
                line.push_str(&format!("\n       {}", t.description));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The toasts shown after an update cycle.
pub fn outcome_messages(outcome: &UpdateOutcome) -> Vec<String> {
    let mut out = Vec::new();
    if outcome.xp_gained > 0 {
        out.push(format!("Quest Complete! +{} XP", outcome.xp_gained));
    }
    if let Some(damage) = outcome.damage_dealt {
        out.push(format!("⚔️  Critical Hit! -{} HP", damage));
    }
    if let Some(boss) = &outcome.defeated {
        out.push(format!(
            "🏆 VICTORY! {} falls. +{} XP!",
            boss.name, outcome.bonus_awarded
        ));
    }
    out
}
