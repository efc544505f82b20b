use calcapp_core::{HistoryEntry, SubmissionController};

use crate::exit_codes::{FAILED, SUCCESS};

pub fn list(session: &SubmissionController, json: bool) -> anyhow::Result<i32> {
    let entries = session.history();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(SUCCESS);
    }

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(SUCCESS);
    }
    for (n, entry) in entries.iter().enumerate() {
        println!("{}", format_line(n + 1, entry));
    }
    Ok(SUCCESS)
}

pub fn show(session: &SubmissionController, id: &str) -> i32 {
    let Some(entry) = session.history().into_iter().find(|e| e.id() == id) else {
        eprintln!("error: no history entry with id '{id}'");
        return FAILED;
    };

    println!("{}", entry.expression());
    println!("= {}", entry.result());
    println!(
        "evaluated {}",
        entry.evaluated_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    SUCCESS
}

pub fn clear(session: &SubmissionController) -> i32 {
    session.clear_history();
    SUCCESS
}

/// `  1  2 + 2 * 3 = 8  [id]`
pub(crate) fn format_line(position: usize, entry: &HistoryEntry) -> String {
    format!(
        "{position:>3}  {} = {}  [{}]",
        entry.expression(),
        entry.result(),
        entry.id()
    )
}
