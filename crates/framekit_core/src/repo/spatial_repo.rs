//! Frame/circle collection access and its SQLite implementation.
//!
//! # Responsibility
//! - Supply the comparison sets the validators need (all frames, circles of
//!   one frame).
//! - Persist frames and circles once a service has validated them.
//! - Provide the write lock that makes read-validate-write atomic.
//!
//! # Invariants
//! - Listing order is deterministic: insertion order.
//! - Read paths reject rows that no longer map to a valid model.
//! - The repository performs no spatial validation of its own.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::circle::{Circle, CircleId};
use crate::model::frame::{Frame, FrameId};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const FRAME_SELECT_SQL: &str = "SELECT
    uuid,
    center_x,
    center_y,
    width,
    height
FROM frames";

const CIRCLE_SELECT_SQL: &str = "SELECT
    uuid,
    frame_uuid,
    center_x,
    center_y,
    diameter
FROM circles";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure for frame and circle storage.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    FrameNotFound(FrameId),
    CircleNotFound(CircleId),
    /// Connection is not migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A stored row cannot be turned back into a valid model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::FrameNotFound(id) => write!(f, "frame not found: {id}"),
            Self::CircleNotFound(id) => write!(f, "circle not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "spatial repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
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

/// Collection access used by the lifecycle services.
pub trait SpatialRepository {
    /// Runs `work` while holding the store's exclusive write lock.
    ///
    /// Changes made by `work` commit when it returns `Ok` and roll back when
    /// it returns `Err`. Calls must not nest.
    fn write_locked<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<RepoError>;

    fn list_frames(&self) -> RepoResult<Vec<Frame>>;
    fn find_frame(&self, id: FrameId) -> RepoResult<Option<Frame>>;
    fn insert_frame(&self, frame: &Frame) -> RepoResult<()>;
    fn update_frame(&self, frame: &Frame) -> RepoResult<()>;
    fn delete_frame(&self, id: FrameId) -> RepoResult<()>;

    fn list_circles(&self, frame_id: FrameId) -> RepoResult<Vec<Circle>>;
    fn list_all_circles(&self) -> RepoResult<Vec<Circle>>;
    fn find_circle(&self, id: CircleId) -> RepoResult<Option<Circle>>;
    fn count_circles(&self, frame_id: FrameId) -> RepoResult<u64>;
    fn insert_circle(&self, circle: &Circle) -> RepoResult<()>;
    fn update_circle(&self, circle: &Circle) -> RepoResult<()>;
    /// Returns whether a row was removed.
    fn delete_circle(&self, id: CircleId) -> RepoResult<bool>;
    /// Removes every circle of one frame and returns how many were removed.
    fn delete_circles_of_frame(&self, frame_id: FrameId) -> RepoResult<u64>;
}

/// SQLite-backed frame/circle store.
#[derive(Clone, Copy)]
pub struct SqliteSpatialRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSpatialRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = schema_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl SpatialRepository for SqliteSpatialRepository<'_> {
    fn write_locked<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<RepoError>,
    {
        // IMMEDIATE takes the write lock up front so concurrent writers queue
        // before reading their comparison set.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;
        let value = work(self)?;
        tx.commit().map_err(RepoError::from)?;
        Ok(value)
    }

    fn list_frames(&self) -> RepoResult<Vec<Frame>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FRAME_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut frames = Vec::new();
        while let Some(row) = rows.next()? {
            frames.push(parse_frame_row(row)?);
        }
        Ok(frames)
    }

    fn find_frame(&self, id: FrameId) -> RepoResult<Option<Frame>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FRAME_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_frame_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert_frame(&self, frame: &Frame) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO frames (uuid, center_x, center_y, width, height)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                frame.uuid.to_string(),
                frame.center_x,
                frame.center_y,
                frame.width,
                frame.height,
            ],
        )?;
        Ok(())
    }

    fn update_frame(&self, frame: &Frame) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE frames
             SET
                center_x = ?2,
                center_y = ?3,
                width = ?4,
                height = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                frame.uuid.to_string(),
                frame.center_x,
                frame.center_y,
                frame.width,
                frame.height,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::FrameNotFound(frame.uuid));
        }
        Ok(())
    }

    fn delete_frame(&self, id: FrameId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM frames WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::FrameNotFound(id));
        }
        Ok(())
    }

    fn list_circles(&self, frame_id: FrameId) -> RepoResult<Vec<Circle>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CIRCLE_SELECT_SQL}
             WHERE frame_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([frame_id.to_string()])?;
        let mut circles = Vec::new();
        while let Some(row) = rows.next()? {
            circles.push(parse_circle_row(row)?);
        }
        Ok(circles)
    }

    fn list_all_circles(&self) -> RepoResult<Vec<Circle>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CIRCLE_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut circles = Vec::new();
        while let Some(row) = rows.next()? {
            circles.push(parse_circle_row(row)?);
        }
        Ok(circles)
    }

    fn find_circle(&self, id: CircleId) -> RepoResult<Option<Circle>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CIRCLE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_circle_row(row)?)),
            None => Ok(None),
        }
    }

    fn count_circles(&self, frame_id: FrameId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM circles WHERE frame_uuid = ?1;",
            [frame_id.to_string()],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative circle count `{count}`")))
    }

    fn insert_circle(&self, circle: &Circle) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO circles (uuid, frame_uuid, center_x, center_y, diameter)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                circle.uuid.to_string(),
                circle.frame_uuid.to_string(),
                circle.center_x,
                circle.center_y,
                circle.diameter,
            ],
        )?;
        Ok(())
    }

    fn update_circle(&self, circle: &Circle) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE circles
             SET
                center_x = ?2,
                center_y = ?3,
                diameter = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                circle.uuid.to_string(),
                circle.center_x,
                circle.center_y,
                circle.diameter,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::CircleNotFound(circle.uuid));
        }
        Ok(())
    }

    fn delete_circle(&self, id: CircleId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM circles WHERE uuid = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn delete_circles_of_frame(&self, frame_id: FrameId) -> RepoResult<u64> {
        let changed = self.conn.execute(
            "DELETE FROM circles WHERE frame_uuid = ?1;",
            [frame_id.to_string()],
        )?;
        Ok(changed as u64)
    }
}

/// Loads the frame or fails with `FrameNotFound`.
pub fn require_frame<R: SpatialRepository>(repo: &R, id: FrameId) -> RepoResult<Frame> {
    repo.find_frame(id)?.ok_or(RepoError::FrameNotFound(id))
}

/// Loads the circle or fails with `CircleNotFound`.
pub fn require_circle<R: SpatialRepository>(repo: &R, id: CircleId) -> RepoResult<Circle> {
    repo.find_circle(id)?.ok_or(RepoError::CircleNotFound(id))
}

fn parse_frame_row(row: &Row<'_>) -> RepoResult<Frame> {
    let frame = Frame {
        uuid: parse_uuid(&row.get::<_, String>("uuid")?, "frames.uuid")?,
        center_x: finite(row.get("center_x")?, "frames.center_x")?,
        center_y: finite(row.get("center_y")?, "frames.center_y")?,
        width: positive(row.get("width")?, "frames.width")?,
        height: positive(row.get("height")?, "frames.height")?,
    };
    Ok(frame)
}

fn parse_circle_row(row: &Row<'_>) -> RepoResult<Circle> {
    let circle = Circle {
        uuid: parse_uuid(&row.get::<_, String>("uuid")?, "circles.uuid")?,
        frame_uuid: parse_uuid(&row.get::<_, String>("frame_uuid")?, "circles.frame_uuid")?,
        center_x: finite(row.get("center_x")?, "circles.center_x")?,
        center_y: finite(row.get("center_y")?, "circles.center_y")?,
        diameter: positive(row.get("diameter")?, "circles.diameter")?,
    };
    Ok(circle)
}

fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn finite(value: f64, column: &'static str) -> RepoResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RepoError::InvalidData(format!(
            "non-finite value `{value}` in {column}"
        )))
    }
}

fn positive(value: f64, column: &'static str) -> RepoResult<f64> {
    let value = finite(value, column)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(RepoError::InvalidData(format!(
            "non-positive value `{value}` in {column}"
        )))
    }
}

