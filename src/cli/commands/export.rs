use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config, actor: &str) -> AppResult<()> {
    if let Commands::Export {
        what,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let mut s = open_session(cfg, actor)?;
        ExportLogic::export(
            &mut s.pool,
            &s.actor,
            *what,
            *format,
            file,
            range.as_deref(),
            *force,
        )?;
    }
    Ok(())
}
