#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use kitatime::config::Config;
use kitatime::core::user::UserLogic;
use kitatime::db::initialize::init_db;
use kitatime::db::pool::DbPool;
use kitatime::models::role::Role;
use kitatime::models::user::{NewUser, User};
use kitatime::notify::{EmailMessage, Notifier, NotifyError, PushPayload};
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("kitatime")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_kitatime.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_kitatime_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, migrated database plus a default configuration pointing at it.
pub fn fresh(name: &str) -> (DbPool, Config) {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    (pool, Config::with_database(&db_path))
}

/// The users most tests work with.
pub struct Team {
    pub admin: User,
    pub lead: User,
    /// staff, 30h over 5 days, has an email address
    pub anna: User,
    /// staff, 39h over 5 days, no email address
    pub ben: User,
}

pub fn seed_team(pool: &mut DbPool) -> Team {
    let admin = UserLogic::bootstrap(pool)
        .expect("bootstrap")
        .expect("empty directory");

    let mut lead = NewUser::new("lena", "Lena Leitung", Role::Leadership);
    lead.email = Some("lena@kita.example".into());
    lead.weekly_hours = 39.0;
    let lead = UserLogic::create(pool, &admin, &lead).expect("create lead");

    let mut anna = NewUser::new("anna", "Anna Albrecht", Role::Staff);
    anna.email = Some("anna@kita.example".into());
    anna.weekly_hours = 30.0;
    let anna = UserLogic::create(pool, &admin, &anna).expect("create anna");

    let mut ben = NewUser::new("ben", "Ben Berger", Role::Staff);
    ben.weekly_hours = 39.0;
    let ben = UserLogic::create(pool, &admin, &ben).expect("create ben");

    Team {
        admin,
        lead,
        anna,
        ben,
    }
}

/// Initialize a database through the CLI (which seeds `admin`).
pub fn cli_init(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Records every delivery instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub emails: RefCell<Vec<(String, EmailMessage)>>,
    pub pushes: RefCell<Vec<(i64, PushPayload)>>,
}

impl Notifier for RecordingNotifier {
    fn send_email(&self, to: &str, message: &EmailMessage) -> Result<(), NotifyError> {
        self.emails
            .borrow_mut()
            .push((to.to_string(), message.clone()));
        Ok(())
    }

    fn send_push(&self, user_id: i64, payload: &PushPayload) -> Result<(), NotifyError> {
        self.pushes.borrow_mut().push((user_id, payload.clone()));
        Ok(())
    }
}

/// Every delivery fails like an unreachable mail server.
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send_email(&self, _to: &str, _message: &EmailMessage) -> Result<(), NotifyError> {
        Err(NotifyError::Build("connection refused".into()))
    }

    fn send_push(&self, _user_id: i64, _payload: &PushPayload) -> Result<(), NotifyError> {
        Err(NotifyError::Build("connection refused".into()))
    }
}
