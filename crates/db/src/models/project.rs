use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool, Type};
use strum_macros::{Display, EnumString};

/// Owner recorded when the caller supplies no identity.
pub const ANONYMOUS_OWNER: &str = "anonymous";

/// Experience tier a brief is written for.
#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, Default,
)]
#[sqlx(type_name = "skill_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    #[default]
    Advanced,
}

impl SkillLevel {
    /// Lenient parse: unrecognized values map to the least-scaffolded tier
    /// instead of an error, so generation is never blocked on input shape.
    pub fn parse_lenient(s: &str) -> Self {
        s.trim().to_lowercase().parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub owner_id: String,
    pub skill_level: SkillLevel,
    pub tech_stack: String,
    pub project_type: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// List/search row shape; excludes the content body.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub title: String,
    pub skill_level: SkillLevel,
    pub tech_stack: String,
    pub project_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub owner_id: Option<String>,
    pub skill_level: SkillLevel,
    pub tech_stack: String,
    pub project_type: String,
    pub title: String,
    pub content: String,
}

/// Mutable-field allow-list for updates. Anything else a caller sends is
/// dropped during deserialization rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub tech_stack: Option<String>,
    pub content: Option<String>,
}

impl UpdateProject {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.tech_stack.is_none() && self.content.is_none()
    }
}

const SUMMARY_COLUMNS: &str = "id, title, skill_level, tech_stack, project_type, created_at";

impl Project {
    pub async fn create(pool: &SqlitePool, data: &CreateProject) -> Result<i64, sqlx::Error> {
        let owner = data.owner_id.as_deref().unwrap_or(ANONYMOUS_OWNER);
        sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO projects (owner_id, skill_level, tech_stack, project_type, title, content)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id"#,
        )
        .bind(owner)
        .bind(data.skill_level)
        .bind(&data.tech_stack)
        .bind(&data.project_type)
        .bind(&data.title)
        .bind(&data.content)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, owner_id, skill_level, tech_stack, project_type, title, content, created_at
            FROM projects
            WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Newest-first page of one owner's projects.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        owner_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectSummary>(
            r#"SELECT id, title, skill_level, tech_stack, project_type, created_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3"#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Search one owner's projects. A non-empty `query` matches title or
    /// content as a case-insensitive substring; the optional filters are
    /// conjunctive and omitted from the predicate entirely when absent.
    pub async fn search(
        pool: &SqlitePool,
        owner_id: &str,
        query: &str,
        skill_level: Option<SkillLevel>,
        project_type: Option<&str>,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {SUMMARY_COLUMNS} FROM projects WHERE owner_id = "
        ));
        builder.push_bind(owner_id.to_string());

        let query = query.trim();
        if !query.is_empty() {
            let pattern = format!("%{query}%");
            builder.push(" AND (title LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR content LIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(level) = skill_level {
            builder.push(" AND skill_level = ");
            builder.push_bind(level);
        }
        if let Some(kind) = project_type {
            builder.push(" AND project_type = ");
            builder.push_bind(kind.to_string());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        builder
            .build_query_as::<ProjectSummary>()
            .fetch_all(pool)
            .await
    }

    /// Apply allow-listed field changes. Returns whether a row was actually
    /// written, which requires both an existing id and a matching owner. An
    /// empty change set is a no-op that reports `false` without touching the
    /// database.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        owner_id: &str,
        changes: &UpdateProject,
    ) -> Result<bool, sqlx::Error> {
        if changes.is_empty() {
            return Ok(false);
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE projects SET ");
        let mut fields = builder.separated(", ");
        if let Some(title) = &changes.title {
            fields.push("title = ");
            fields.push_bind_unseparated(title.clone());
        }
        if let Some(tech_stack) = &changes.tech_stack {
            fields.push("tech_stack = ");
            fields.push_bind_unseparated(tech_stack.clone());
        }
        if let Some(content) = &changes.content {
            fields.push("content = ");
            fields.push_bind_unseparated(content.clone());
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" AND owner_id = ");
        builder.push_bind(owner_id.to_string());

        let result = builder.build().execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a project the caller owns. Returns whether a row was removed.
    pub async fn delete(pool: &SqlitePool, id: i64, owner_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool, owner_id: Option<&str>) -> Result<i64, sqlx::Error> {
        match owner_id {
            Some(owner) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE owner_id = $1")
                    .bind(owner)
                    .fetch_one(pool)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
                    .fetch_one(pool)
                    .await
            }
        }
    }
}
