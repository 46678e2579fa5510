use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::user::UserLogic;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
///  - an `admin` account when no user exists yet
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing kitatime…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let mut pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;
    success(format!("Database initialized at {}", &db_path));

    match UserLogic::bootstrap(&mut pool)? {
        Some(admin) => info(format!(
            "Created user '{}' with role admin; use --as {} for the first steps",
            admin.username, admin.username
        )),
        None => info("Users already present, no account created"),
    }

    // the audit row is not essential for a working setup
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 kitatime initialization completed!");
    Ok(())
}
