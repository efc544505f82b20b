use std::io::{IsTerminal, Write};

use calcapp_core::{SubmissionController, SubmitOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::history::format_line;
use crate::exit_codes::SUCCESS;

const HELP: &str = "\
Type an expression to evaluate it.
  :history          list past evaluations
  :select <n|id>    show entry n (1 = newest) or the entry with that id
  :clear            clear the history
  :quit             leave";

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Expression(&'a str),
    History,
    Select(&'a str),
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Line::Expression(trimmed);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match (name, arg) {
        ("history" | "h", "") => Line::History,
        ("select" | "s", arg) if !arg.is_empty() => Line::Select(arg),
        ("clear", "") => Line::Clear,
        ("help" | "?", "") => Line::Help,
        ("quit" | "q" | "exit", "") => Line::Quit,
        _ => Line::Unknown(trimmed),
    }
}

/// Resolves `n` (1-based position) or a literal id.
fn resolve_selection(session: &SubmissionController, arg: &str) -> Option<String> {
    let history = session.history();
    if let Ok(n) = arg.parse::<usize>() {
        if let Some(entry) = n.checked_sub(1).and_then(|i| history.get(i)) {
            return Some(entry.id().to_string());
        }
    }
    history
        .iter()
        .find(|e| e.id() == arg)
        .map(|e| e.id().to_string())
}

pub async fn run(session: &SubmissionController) -> anyhow::Result<i32> {
    let interactive = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if interactive {
            print!("calc> ");
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Line::Expression("") => {}
            Line::Expression(expression) => {
                session.set_expression(expression);
                if let SubmitOutcome::Evaluated(entry) = session.submit().await {
                    println!("{}", entry.result());
                }
            }
            Line::History => {
                let history = session.history();
                if history.is_empty() {
                    println!("No history yet.");
                }
                for (n, entry) in history.iter().enumerate() {
                    println!("{}", format_line(n + 1, entry));
                }
            }
            Line::Select(arg) => match resolve_selection(session, arg)
                .and_then(|id| session.select_history(&id))
            {
                Some(entry) => println!("{} = {}", entry.expression(), entry.result()),
                None => eprintln!("error: no history entry '{arg}'"),
            },
            Line::Clear => session.clear_history(),
            Line::Help => println!("{HELP}"),
            Line::Quit => break,
            Line::Unknown(input) => eprintln!("error: unknown command '{input}' (try :help)"),
        }
    }
    Ok(SUCCESS)
}
