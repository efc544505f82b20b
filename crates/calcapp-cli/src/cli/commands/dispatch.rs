use super::super::args::*;
use crate::config::ClientConfig;
use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    if let Command::Examples = cli.cmd {
        super::examples::print();
        return Ok(SUCCESS);
    }

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url);
    }
    if let Some(dir) = cli.history_dir {
        config = config.with_history_dir(dir);
    }

    let session = super::open_session(&config)?;
    match cli.cmd {
        Command::Eval(args) => Ok(super::eval::run(&session, &args.joined()).await),
        Command::Repl => super::repl::run(&session).await,
        Command::History(args) => match args.cmd {
            HistorySub::List { json } => super::history::list(&session, json),
            HistorySub::Show { id } => Ok(super::history::show(&session, &id)),
            HistorySub::Clear => Ok(super::history::clear(&session)),
        },
        Command::Examples => Ok(SUCCESS),
    }
}
