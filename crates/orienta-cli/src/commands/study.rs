use crate::app::App;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use orienta_application::{AutosaveStatus, StudySession};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

async fn open(app: &App, id: &str) -> Result<StudySession> {
    app.auth.require_authenticated().await?;
    let session = StudySession::open(id, app.guides.clone(), app.messages.clone(), &app.config).await?;
    Ok(session)
}

fn into_result(status: AutosaveStatus) -> Result<()> {
    match status.last_failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Applies the requested flags and waits for the batch save.
pub async fn toggle(app: &App, id: &str, days: &[u32], undo: bool) -> Result<()> {
    let session = open(app, id).await?;
    for &day in days {
        session.toggle_day(day, !undo)?;
    }

    if session.status().timer_pending {
        println!("{}", "Saving...".bright_black());
    }
    let status = session.wait_until_settled().await;
    println!("{}", output::progress_bar(&session.progress()));
    into_result(status)
}

enum Input {
    Days(Vec<u32>),
    Show,
    Help,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line {
        "q" | "quit" | "exit" => Input::Quit,
        "s" | "show" => Input::Show,
        "h" | "help" | "?" => Input::Help,
        _ => line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<std::result::Result<Vec<u32>, _>>()
            .map(Input::Days)
            .unwrap_or(Input::Unknown),
    }
}

fn print_help() {
    println!(
        "{}",
        "Type day numbers to flip them (e.g. `1 2`), `s` to show the guide, `q` to quit.".bright_black()
    );
}

/// Interactive study loop. Flips run through autosave in the background;
/// quitting waits for pending changes to be saved.
pub async fn interactive(app: &App, id: &str) -> Result<()> {
    let session = open(app, id).await?;
    let mut editor = DefaultEditor::new()?;

    output::print_guide(&session.guide());
    println!();
    print_help();

    loop {
        match editor.readline("day> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                match parse_input(trimmed) {
                    Input::Quit => break,
                    Input::Show => output::print_guide(&session.guide()),
                    Input::Help => print_help(),
                    Input::Unknown => println!("{}", "Unknown input".bright_black()),
                    Input::Days(days) => {
                        for day in days {
                            match session.flip_day(day) {
                                Ok(_) => {}
                                Err(e) => eprintln!("{}", e.user_message().red()),
                            }
                        }
                        println!("{}", output::progress_bar(&session.progress()));
                        output::print_autosave(&session.status());
                    }
                }
                output::print_notices(&app.messages.drain());
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'q' to quit.".yellow());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    if !session.status().is_settled() {
        println!("{}", "Saving your progress...".bright_black());
    }
    let status = session.wait_until_settled().await;
    session.close();
    output::print_autosave(&status);
    into_result(status)
}
