use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "calcapp",
    version,
    about = "Evaluate mathematical expressions and keep a local history"
)]
pub struct Cli {
    /// Server root URL (overrides CALCAPP_SERVER_URL)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// History directory (overrides CALCAPP_HISTORY_DIR)
    #[arg(long, global = true)]
    pub history_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate one expression and print the result
    Eval(EvalArgs),
    /// Interactive session; `:help` lists commands
    Repl,
    /// Inspect or clear the evaluation history
    History(HistoryArgs),
    /// Print example expressions
    Examples,
}

#[derive(Args)]
pub struct EvalArgs {
    /// Expression; multiple words are joined with spaces
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub expression: Vec<String>,
}

impl EvalArgs {
    pub fn joined(&self) -> String {
        self.expression.join(" ")
    }
}

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub cmd: HistorySub,
}

#[derive(Subcommand)]
pub enum HistorySub {
    /// List entries, newest first
    List {
        /// Emit the stored JSON array
        #[arg(long)]
        json: bool,
    },
    /// Show one entry by id
    Show { id: String },
    /// Remove every entry
    Clear,
}
