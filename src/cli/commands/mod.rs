pub mod child;
pub mod config;
pub mod entry;
pub mod event;
pub mod export;
pub mod import;
pub mod init;
pub mod lock;
pub mod log;
pub mod stats;
pub mod user;

use crate::config::Config;
use crate::core::user::UserLogic;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use crate::utils::date::parse_year_month;

/// Open database plus the acting user of one command.
pub struct Session {
    pub pool: DbPool,
    pub actor: User,
}

/// Open the configured database (running pending migrations) and resolve
/// the acting user by username.
pub fn open_session(cfg: &Config, actor: &str) -> AppResult<Session> {
    let mut pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    let actor = match UserLogic::by_username(&mut pool, actor) {
        Ok(u) => u,
        Err(AppError::NotFound(_)) => {
            return Err(AppError::NotFound(format!(
                "Acting user '{}' (run `kitatime init` or pass --as)",
                actor
            )));
        }
        Err(e) => return Err(e),
    };

    Ok(Session { pool, actor })
}

impl Session {
    /// Id of a user given by username or full name.
    pub fn user_id(&mut self, name: &str) -> AppResult<i64> {
        Ok(UserLogic::resolve(&mut self.pool, name)?.id)
    }

    /// `--user` if given, otherwise the actor.
    pub fn user_or_self(&mut self, name: Option<&str>) -> AppResult<i64> {
        match name {
            Some(n) => self.user_id(n),
            None => Ok(self.actor.id),
        }
    }

    pub fn user_ids(&mut self, names: &[String]) -> AppResult<Vec<i64>> {
        names.iter().map(|n| self.user_id(n)).collect()
    }
}

/// `YYYY-MM`, or the current month when absent.
pub(crate) fn period_or_current(period: Option<&str>) -> AppResult<(i32, u32)> {
    use chrono::Datelike;
    match period {
        Some(p) => parse_year_month(p),
        None => {
            let today = crate::utils::date::today();
            Ok((today.year(), today.month()))
        }
    }
}
