use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config, actor: &str) -> AppResult<()> {
    let Commands::Import { file, template } = cmd else {
        return Ok(());
    };

    if let Some(path) = template {
        ImportLogic::write_template(path)?;
        success(format!("Import template written to {}", path));
        return Ok(());
    }

    let Some(file) = file else {
        return Ok(());
    };

    let mut s = open_session(cfg, actor)?;
    let report = ImportLogic::import_entries(&mut s.pool, cfg, &s.actor, file)?;

    for w in &report.warnings {
        warning(w);
    }
    for e in &report.errors {
        error(e);
    }
    if report.is_success() {
        success(format!("{} entries imported from {}", report.imported, file));
    } else {
        warning(format!(
            "{} entries imported, {} row(s) rejected",
            report.imported,
            report.errors.len()
        ));
    }
    Ok(())
}
