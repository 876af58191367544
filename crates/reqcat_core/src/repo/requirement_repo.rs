//! Requirement repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `requirements` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate input shapes before SQL mutations.
//! - `id` and `created_at` are assigned by SQLite, never by callers.
//! - List order is `created_at DESC, id DESC` (newest first).

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::requirement::{
    Requirement, RequirementDraft, RequirementId, RequirementPatch, RequirementValidationError,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REQUIREMENT_SELECT_SQL: &str = "SELECT
    id,
    attribute,
    description,
    domain,
    source_system,
    source_entity,
    responsible_analyst,
    created_at
FROM requirements";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for requirement persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(RequirementValidationError),
    Db(DbError),
    NotFound(RequirementId),
    InvalidData(String),
    /// Connection has not been migrated to the supported schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Connection is missing a table required by this repository.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "requirement not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted requirement data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RequirementValidationError> for RepoError {
    fn from(value: RequirementValidationError) -> Self {
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

/// Query options for listing requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementListQuery {
    /// Case-insensitive substring filter on `responsible_analyst`.
    pub analyst_contains: Option<String>,
    /// Return at most the single newest record.
    ///
    /// Mirrors a behavior observed in an earlier iteration of the list
    /// endpoint; the full newest-first list is the default.
    pub latest_only: bool,
}

/// Repository interface for requirement CRUD operations.
pub trait RequirementRepository {
    /// Persists a draft; the store assigns `id` and `created_at`.
    fn insert(&self, draft: &RequirementDraft) -> RepoResult<Requirement>;
    /// Gets one requirement by id.
    fn get(&self, id: RequirementId) -> RepoResult<Requirement>;
    /// Lists requirements newest first, optionally filtered.
    fn list(&self, query: &RequirementListQuery) -> RepoResult<Vec<Requirement>>;
    /// Applies only the provided patch fields and returns the new state.
    fn update(&self, id: RequirementId, patch: &RequirementPatch) -> RepoResult<Requirement>;
    /// Removes one requirement permanently. No spreadsheet interaction.
    fn delete(&self, id: RequirementId) -> RepoResult<()>;
}

/// SQLite-backed requirement repository.
pub struct SqliteRequirementRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRequirementRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// Rejects connections that have not been opened through the db
    /// bootstrap, so repository code never runs against a missing schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'requirements'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("requirements"));
        }

        Ok(Self { conn })
    }
}

impl RequirementRepository for SqliteRequirementRepository<'_> {
    fn insert(&self, draft: &RequirementDraft) -> RepoResult<Requirement> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO requirements (
                attribute,
                description,
                domain,
                source_system,
                source_entity,
                responsible_analyst
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                draft.attribute.as_str(),
                draft.description.as_str(),
                draft.domain.as_str(),
                draft.source_system.as_str(),
                draft.source_entity.as_str(),
                draft.responsible_analyst.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get(id)
    }

    fn get(&self, id: RequirementId) -> RepoResult<Requirement> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REQUIREMENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => parse_requirement_row(row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn list(&self, query: &RequirementListQuery) -> RepoResult<Vec<Requirement>> {
        let mut sql = format!("{REQUIREMENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = query
            .analyst_contains
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
        {
            // instr() avoids LIKE wildcard handling for user-provided text.
            sql.push_str(" AND instr(lower(responsible_analyst), lower(?)) > 0");
            bind_values.push(Value::Text(needle.to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        if query.latest_only {
            sql.push_str(" LIMIT 1");
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut requirements = Vec::new();

        while let Some(row) = rows.next()? {
            requirements.push(parse_requirement_row(row)?);
        }

        Ok(requirements)
    }

    fn update(&self, id: RequirementId, patch: &RequirementPatch) -> RepoResult<Requirement> {
        patch.validate()?;

        if patch.is_empty() {
            return self.get(id);
        }

        let mut sql = String::from("UPDATE requirements SET ");
        let mut assignments: Vec<String> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        for (field, value) in patch.named_fields() {
            if let Some(value) = value {
                assignments.push(format!("{field} = ?"));
                bind_values.push(Value::Text(value.to_string()));
            }
        }

        sql.push_str(&assignments.join(", "));
        sql.push_str(" WHERE id = ?;");
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.get(id)
    }

    fn delete(&self, id: RequirementId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM requirements WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_requirement_row(row: &Row<'_>) -> RepoResult<Requirement> {
    let requirement = Requirement {
        id: row.get("id")?,
        attribute: row.get("attribute")?,
        description: row.get("description")?,
        domain: row.get("domain")?,
        source_system: row.get("source_system")?,
        source_entity: row.get("source_entity")?,
        responsible_analyst: row.get("responsible_analyst")?,
        created_at: row.get("created_at")?,
    };

    if requirement.id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{}` in requirements.id",
            requirement.id
        )));
    }

    Ok(requirement)
}

#[cfg(test)]
mod tests {
    use super::REQUIREMENT_SELECT_SQL;
    use crate::model::requirement::REQUIREMENT_FIELDS;

    #[test]
    fn select_covers_every_canonical_field() {
        for field in REQUIREMENT_FIELDS {
            assert!(
                REQUIREMENT_SELECT_SQL.contains(field),
                "select is missing column {field}"
            );
        }
    }
}
