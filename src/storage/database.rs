//! SQLite Database
//!
//! Embedded database for persistent storage using rusqlite with r2d2 connection pooling.
//! Covers tasks, file snapshots, and the recent-activity feed. The database file
//! is created on first run.

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::models::{Activity, ActivityKind, Snapshot, Task, TaskPriority, TaskStatus};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::database_path;

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

fn parse_timestamp(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

impl Database {
    /// Create a new database instance with connection pooling
    pub fn new() -> AppResult<Self> {
        let db_path = database_path()?;

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::with_file(&db_path)
    }

    /// Create a database backed by an explicit file path
    pub fn with_file(path: &std::path::Path) -> AppResult<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create an in-memory database for testing.
    ///
    /// Uses an in-memory SQLite database with the same schema as the
    /// production database. Useful for integration and unit tests.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'todo',
                priority TEXT NOT NULL DEFAULT 'medium',
                due_date TEXT,
                linked_files TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                file_path TEXT NOT NULL,
                hash TEXT NOT NULL,
                size_bytes INTEGER NOT NULL DEFAULT 0,
                content BLOB NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_snapshots_file_path
             ON snapshots(file_path, id)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS activities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                message TEXT NOT NULL,
                task_id TEXT,
                file_path TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_activities_created_at
             ON activities(created_at DESC)",
            [],
        )?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Get the connection pool
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Check if the database is healthy
    pub fn is_healthy(&self) -> bool {
        if let Ok(conn) = self.pool.get() {
            conn.query_row("SELECT 1", [], |_| Ok(())).is_ok()
        } else {
            false
        }
    }

    // ========================================================================
    // Task Operations
    // ========================================================================

    /// Insert a new task row
    pub fn insert_task(&self, task: &Task) -> AppResult<()> {
        let conn = self.get_connection()?;
        let linked_files = serde_json::to_string(&task.linked_files)?;
        conn.execute(
            "INSERT INTO tasks (id, title, description, status, priority, due_date, linked_files, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.title,
                task.description,
                task.status.as_str(),
                task.priority.as_str(),
                task.due_date.map(|d| d.to_rfc3339()),
                linked_files,
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Update an existing task row
    pub fn update_task(&self, task: &Task) -> AppResult<()> {
        let conn = self.get_connection()?;
        let linked_files = serde_json::to_string(&task.linked_files)?;
        let changed = conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, status = ?4, priority = ?5,
             due_date = ?6, linked_files = ?7, updated_at = ?8 WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.status.as_str(),
                task.priority.as_str(),
                task.due_date.map(|d| d.to_rfc3339()),
                linked_files,
                task.updated_at.to_rfc3339(),
            ],
        )?;
        if changed == 0 {
            return Err(AppError::not_found(format!("task {}", task.id)));
        }
        Ok(())
    }

    /// Get a task by ID
    pub fn get_task(&self, id: &str) -> AppResult<Option<Task>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            "SELECT id, title, description, status, priority, due_date, linked_files, created_at, updated_at
             FROM tasks WHERE id = ?1",
            params![id],
            Self::row_to_task,
        );

        match result {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// List all tasks in creation order
    pub fn list_tasks(&self) -> AppResult<Vec<Task>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, status, priority, due_date, linked_files, created_at, updated_at
             FROM tasks ORDER BY created_at ASC, id ASC",
        )?;
        let tasks = stmt
            .query_map([], Self::row_to_task)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(tasks)
    }

    /// Count stored tasks
    pub fn task_count(&self) -> AppResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Helper function to convert a database row to Task
    fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let status_str: String = row.get(3)?;
        let priority_str: String = row.get(4)?;
        let due_date: Option<String> = row.get(5)?;
        let linked_files_json: String = row.get(6)?;
        let created_at: String = row.get(7)?;
        let updated_at: String = row.get(8)?;

        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status: TaskStatus::parse(&status_str).unwrap_or(TaskStatus::Todo),
            priority: TaskPriority::parse(&priority_str).unwrap_or(TaskPriority::Medium),
            due_date: match due_date {
                Some(raw) => Some(parse_timestamp(&raw)?),
                None => None,
            },
            linked_files: serde_json::from_str(&linked_files_json).unwrap_or_default(),
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    // ========================================================================
    // Snapshot Operations
    // ========================================================================

    /// Insert a snapshot row
    pub fn insert_snapshot(&self, snapshot: &Snapshot) -> AppResult<()> {
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO snapshots (file_path, hash, size_bytes, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                snapshot.file_path,
                snapshot.hash,
                snapshot.size_bytes as i64,
                snapshot.compressed,
                snapshot.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get all snapshots for a file, oldest first
    pub fn get_snapshots_for_file(&self, file_path: &str) -> AppResult<Vec<Snapshot>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT file_path, hash, size_bytes, content, created_at
             FROM snapshots WHERE file_path = ?1 ORDER BY id ASC",
        )?;
        let rows: Vec<Snapshot> = stmt
            .query_map(params![file_path], |row| {
                let size_bytes: i64 = row.get(2)?;
                let created_at: String = row.get(4)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    size_bytes as usize,
                    row.get::<_, Vec<u8>>(3)?,
                    parse_timestamp(&created_at)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .filter_map(|(file_path, hash, size_bytes, compressed, created_at)| {
                Snapshot::from_stored(file_path, hash, size_bytes, compressed, created_at).ok()
            })
            .collect();
        Ok(rows)
    }

    /// List distinct file paths that have snapshots
    pub fn snapshot_paths(&self) -> AppResult<Vec<String>> {
        let conn = self.get_connection()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT file_path FROM snapshots ORDER BY file_path ASC")?;
        let paths = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(paths)
    }

    // ========================================================================
    // Activity Operations
    // ========================================================================

    /// Insert an activity feed entry
    pub fn insert_activity(&self, activity: &Activity) -> AppResult<()> {
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO activities (kind, message, task_id, file_path, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                activity.kind.as_str(),
                activity.message,
                activity.task_id,
                activity.file_path,
                activity.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get the most recent activity entries, newest first
    pub fn recent_activities(&self, limit: u32) -> AppResult<Vec<Activity>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT kind, message, task_id, file_path, created_at
             FROM activities ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], |row| {
                let kind_str: String = row.get(0)?;
                let created_at: String = row.get(4)?;
                Ok(Activity {
                    kind: ActivityKind::parse(&kind_str).unwrap_or(ActivityKind::TaskUpdated),
                    message: row.get(1)?,
                    task_id: row.get(2)?,
                    file_path: row.get(3)?,
                    created_at: parse_timestamp(&created_at)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }
}
