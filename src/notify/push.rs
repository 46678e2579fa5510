//! Push notifications are persisted to the `push_notifications` table, from
//! where a delivery worker (or the web client on next poll) picks them up.

use super::{NotifyError, PushPayload};
use crate::db::push::insert_push;
use rusqlite::Connection;

pub struct PushOutbox {
    conn: Connection,
}

impl PushOutbox {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &str) -> Result<Self, NotifyError> {
        Ok(Self::new(Connection::open(path)?))
    }

    pub fn enqueue(&self, user_id: i64, payload: &PushPayload) -> Result<(), NotifyError> {
        let json = serde_json::to_string(payload)?;
        insert_push(&self.conn, user_id, &payload.title, &payload.body, &json)?;
        tracing::debug!(user_id, kind = %payload.kind, "push notification queued");
        Ok(())
    }
}
