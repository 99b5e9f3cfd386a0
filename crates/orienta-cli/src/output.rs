//! Terminal rendering.

use colored::Colorize;
use orienta_application::{AutosavePhase, AutosaveStatus};
use orienta_core::OrientaError;
use orienta_core::guide::{Guide, GuideShelves, Progress};
use orienta_core::notice::{Notice, NoticeKind};

const BAR_WIDTH: usize = 20;

/// Failure already shown to the user as a notice.
#[derive(Debug)]
pub struct Reported;

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("failure already reported")
    }
}

impl std::error::Error for Reported {}

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => println!("{}", notice.text.green()),
            NoticeKind::Error => eprintln!("{}", notice.text.red()),
        }
    }
}

/// Prints an error and, for backend errors, the suggested next step.
pub fn print_failure(err: &anyhow::Error) {
    match err.downcast_ref::<OrientaError>() {
        Some(orienta) => {
            eprintln!("{} {}", "Error:".red().bold(), orienta.user_message());
            eprintln!("{}", orienta.action().yellow());
        }
        None => eprintln!("{} {:#}", "Error:".red().bold(), err),
    }
}

pub fn progress_bar(progress: &Progress) -> String {
    let filled = progress.completed * BAR_WIDTH / progress.total.max(1);
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress
    )
}

pub fn print_shelves(shelves: &GuideShelves) {
    if shelves.is_empty() {
        println!("{}", "No guides yet. Create one with `orienta generate`.".bright_black());
        return;
    }

    for (heading, guides) in [
        ("In progress", &shelves.in_progress),
        ("Completed", &shelves.completed),
    ] {
        if guides.is_empty() {
            continue;
        }
        println!("{}", heading.bright_magenta().bold());
        for guide in guides {
            let progress = Progress::from_days(&guide.daily_study);
            println!(
                "  {}  {}  {}",
                guide.id.bright_black(),
                guide.title.bold(),
                progress_bar(&progress)
            );
        }
        println!();
    }
}

pub fn print_guide(guide: &Guide) {
    let progress = Progress::from_days(&guide.daily_study);
    println!("{}", guide.title.bright_magenta().bold());
    println!(
        "{} {}  {} {}",
        "Topic:".bright_black(),
        guide.topic,
        "Status:".bright_black(),
        guide.status
    );
    println!("{}", progress_bar(&progress));
    println!();

    for day in &guide.daily_study {
        let mark = if day.completed {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        println!("{} {} {}", mark, format!("Day {}:", day.day).bold(), day.title);
        println!("      {} {}", "Goal:".bright_black(), day.goal);
        for question in &day.theoretical_research {
            println!("      - {}", question);
        }
        println!("      {} {}", "Practice:".bright_black(), day.practical_activity);
        println!("      {} {}", "Check:".bright_black(), day.learning_verification);
    }
}

pub fn print_autosave(status: &AutosaveStatus) {
    let label = status.phase.to_string();
    let line = match status.phase {
        AutosavePhase::Idle => label.green(),
        AutosavePhase::Dirty if status.last_failure.is_some() => label.red(),
        AutosavePhase::Dirty => label.yellow(),
        AutosavePhase::Saving => label.cyan(),
    };
    println!("{} {}", "Autosave:".bright_black(), line);
}
