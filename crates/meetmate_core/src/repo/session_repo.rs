//! Session repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable aggregate CRUD APIs over `sessions` storage and its
//!   child tables (`action_items`, `screenshots`).
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `MeetingSession::validate()` before SQL mutations.
//! - `update_session` replaces the whole aggregate atomically.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::action_item::ActionItem;
use crate::model::session::{MeetingSession, ScreenshotCapture, SessionId, SessionValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const SESSION_SELECT_SQL: &str = "SELECT
    uuid,
    notes,
    summary,
    email,
    is_deleted
FROM sessions";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for session persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(SessionValidationError),
    Db(DbError),
    NotFound(SessionId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "session not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted session data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<SessionValidationError> for RepoError {
    fn from(value: SessionValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionListQuery {
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for session aggregate operations.
pub trait SessionRepository {
    fn create_session(&self, session: &MeetingSession) -> RepoResult<SessionId>;
    fn update_session(&self, session: &MeetingSession) -> RepoResult<()>;
    fn get_session(&self, id: SessionId, include_deleted: bool)
        -> RepoResult<Option<MeetingSession>>;
    fn list_sessions(&self, query: &SessionListQuery) -> RepoResult<Vec<MeetingSession>>;
    fn soft_delete_session(&self, id: SessionId) -> RepoResult<()>;
}

/// SQLite-backed session repository.
pub struct SqliteSessionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSessionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn replace_children(&self, session: &MeetingSession) -> RepoResult<()> {
        let session_uuid = session.uuid.to_string();
        self.conn.execute(
            "DELETE FROM action_items WHERE session_uuid = ?1;",
            [session_uuid.as_str()],
        )?;
        self.conn.execute(
            "DELETE FROM screenshots WHERE session_uuid = ?1;",
            [session_uuid.as_str()],
        )?;

        for (position, item) in session.action_items.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO action_items (session_uuid, position, task, assignee, deadline)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    session_uuid.as_str(),
                    position as i64,
                    item.task.as_str(),
                    item.assignee.as_deref(),
                    item.deadline.as_deref(),
                ],
            )?;
        }

        for (position, capture) in session.screenshots.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO screenshots (
                    uuid,
                    session_uuid,
                    position,
                    captured_at_ms,
                    image_data,
                    analysis
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    capture.uuid.to_string(),
                    session_uuid.as_str(),
                    position as i64,
                    capture.captured_at_ms,
                    capture.image_data.as_str(),
                    capture.analysis.as_deref(),
                ],
            )?;
        }

        Ok(())
    }

    fn load_children(&self, session: &mut MeetingSession) -> RepoResult<()> {
        let session_uuid = session.uuid.to_string();

        let mut stmt = self.conn.prepare(
            "SELECT task, assignee, deadline
             FROM action_items
             WHERE session_uuid = ?1
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([session_uuid.as_str()])?;
        while let Some(row) = rows.next()? {
            session.action_items.push(ActionItem {
                task: row.get("task")?,
                assignee: row.get("assignee")?,
                deadline: row.get("deadline")?,
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT uuid, captured_at_ms, image_data, analysis
             FROM screenshots
             WHERE session_uuid = ?1
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([session_uuid.as_str()])?;
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid uuid value `{uuid_text}` in screenshots.uuid"
                ))
            })?;
            session.screenshots.push(ScreenshotCapture {
                uuid,
                captured_at_ms: row.get("captured_at_ms")?,
                image_data: row.get("image_data")?,
                analysis: row.get("analysis")?,
            });
        }

        Ok(())
    }
}

impl SessionRepository for SqliteSessionRepository<'_> {
    fn create_session(&self, session: &MeetingSession) -> RepoResult<SessionId> {
        session.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        self.conn.execute(
            "INSERT INTO sessions (uuid, notes, summary, email, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                session.uuid.to_string(),
                session.notes.as_str(),
                session.summary.as_deref(),
                session.email.as_deref(),
                bool_to_int(session.is_deleted),
            ],
        )?;
        self.replace_children(session)?;
        tx.commit()?;

        Ok(session.uuid)
    }

    fn update_session(&self, session: &MeetingSession) -> RepoResult<()> {
        session.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = self.conn.execute(
            "UPDATE sessions
             SET
                notes = ?1,
                summary = ?2,
                email = ?3,
                is_deleted = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                session.notes.as_str(),
                session.summary.as_deref(),
                session.email.as_deref(),
                bool_to_int(session.is_deleted),
                session.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(session.uuid));
        }

        self.replace_children(session)?;
        tx.commit()?;

        Ok(())
    }

    fn get_session(
        &self,
        id: SessionId,
        include_deleted: bool,
    ) -> RepoResult<Option<MeetingSession>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SESSION_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            let mut session = parse_session_row(row)?;
            self.load_children(&mut session)?;
            session.validate()?;
            return Ok(Some(session));
        }

        Ok(None)
    }

    fn list_sessions(&self, query: &SessionListQuery) -> RepoResult<Vec<MeetingSession>> {
        let mut sql = format!("{SESSION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut sessions = Vec::new();
        {
            let mut stmt = self.conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            while let Some(row) = rows.next()? {
                sessions.push(parse_session_row(row)?);
            }
        }

        for session in &mut sessions {
            self.load_children(session)?;
            session.validate()?;
        }

        Ok(sessions)
    }

    fn soft_delete_session(&self, id: SessionId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE sessions
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_session_row(row: &Row<'_>) -> RepoResult<MeetingSession> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in sessions.uuid"))
    })?;

    let is_deleted = match row.get::<_, i64>("is_deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_deleted value `{other}` in sessions.is_deleted"
            )));
        }
    };

    Ok(MeetingSession {
        uuid,
        notes: row.get("notes")?,
        action_items: Vec::new(),
        screenshots: Vec::new(),
        summary: row.get("summary")?,
        email: row.get("email")?,
        is_deleted,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
