//! Row-level security illustration over an in-memory notes table.
//!
//! The table is plain owned state passed to each call; nothing here is
//! global. With RLS on, a query returns only the caller's rows; with it
//! off, every row comes back and rows owned by others are counted as
//! exposed.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: u64,
    pub owner: String,
    pub data: String,
}

/// The "notes" table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesTable {
    notes: Vec<Note>,
    next_id: u64,
}

impl NotesTable {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
        }
    }

    /// Two rows owned by different users.
    pub fn with_demo_rows() -> Self {
        let mut table = Self::new();
        table.insert("User A", "My secret project notes");
        table.insert("User B", "Personal diary entry");
        table
    }

    /// Append a row. Returns the new id, or `None` when `data` or `owner`
    /// is blank.
    pub fn insert(&mut self, owner: &str, data: &str) -> Option<u64> {
        let (owner, data) = (owner.trim(), data.trim());
        if owner.is_empty() || data.is_empty() {
            return None;
        }
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.notes.push(Note {
            id,
            owner: owner.to_string(),
            data: data.to_string(),
        });
        Some(id)
    }

    /// Drop every row and restart ids at 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn rows(&self) -> &[Note] {
        &self.notes
    }

    /// `SELECT * FROM notes` as `user`.
    pub fn query(&self, user: &str, rls: bool) -> QueryResult<'_> {
        let rows: Vec<&Note> = if rls {
            self.notes.iter().filter(|n| n.owner == user).collect()
        } else {
            self.notes.iter().collect()
        };
        let exposed = rows.iter().filter(|n| n.owner != user).count();
        let sql = if rls {
            format!(
                "SELECT * FROM notes WHERE owner = '{}'; -- RLS adds this filter",
                user.replace('\'', "''")
            )
        } else {
            "SELECT * FROM notes; -- NO FILTERING, ALL DATA EXPOSED".to_string()
        };
        tracing::debug!(user, rls, rows = rows.len(), exposed, "ran notes query");
        QueryResult {
            user: user.to_string(),
            rls,
            sql,
            rows,
            exposed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult<'a> {
    pub user: String,
    pub rls: bool,
    /// Display SQL for the query that effectively ran.
    pub sql: String,
    pub rows: Vec<&'a Note>,
    /// Returned rows owned by someone other than `user`.
    pub exposed: usize,
}

impl QueryResult<'_> {
    pub fn title(&self) -> String {
        let mode = if self.rls {
            "RLS Protected"
        } else {
            "NO RLS PROTECTION"
        };
        format!("Query Results ({} rows) - {mode}", self.rows.len())
    }

    /// Warning text when other users' rows leaked.
    pub fn warning(&self) -> Option<String> {
        (self.exposed > 0).then(|| {
            format!(
                "SECURITY VULNERABILITY! User \"{}\" can see {} record(s) belonging to other users",
                self.user, self.exposed
            )
        })
    }
}
