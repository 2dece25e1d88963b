//! Persistence facade over the project model: stores brief bodies,
//! rehydrates display HTML on read, and exports records. Storage failures
//! propagate to the caller; only generation degrades to fallbacks.

use db::models::project::{
    CreateProject, Project, ProjectSummary, SkillLevel, UpdateProject,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use super::fallback;
use super::markdown::{derive_title, render_markdown};

/// Owner recorded on seeded demo projects.
pub const SAMPLE_OWNER: &str = "sample";

/// A stored project plus its display form. HTML is recomputed from the
/// stored markdown on every read and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWithHtml {
    #[serde(flatten)]
    pub project: Project,
    pub content_html: String,
}

impl std::ops::Deref for ProjectWithHtml {
    type Target = Project;
    fn deref(&self) -> &Self::Target {
        &self.project
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
    Html,
}

impl ExportFormat {
    /// Lenient parse; an unknown format is a lookup miss, not an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            "html" => Some(Self::Html),
            _ => None,
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Markdown => "text/markdown",
            Self::Html => "text/html",
        }
    }
}

#[derive(Clone)]
pub struct ProjectService {
    pool: SqlitePool,
}

impl ProjectService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a brief body and return the assigned id. The title is
    /// derived from the content with the same function the generation
    /// pipeline uses, so the two can never disagree.
    pub async fn save(
        &self,
        owner_id: Option<&str>,
        skill_level: SkillLevel,
        tech_stack: &str,
        project_type: &str,
        content_markdown: &str,
    ) -> Result<i64, sqlx::Error> {
        let data = CreateProject {
            owner_id: owner_id.map(str::to_string),
            skill_level,
            tech_stack: tech_stack.to_string(),
            project_type: project_type.to_string(),
            title: derive_title(content_markdown),
            content: content_markdown.to_string(),
        };
        Project::create(&self.pool, &data).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<ProjectWithHtml>, sqlx::Error> {
        Ok(Project::find_by_id(&self.pool, id).await?.map(|project| {
            let content_html = render_markdown(&project.content);
            ProjectWithHtml {
                project,
                content_html,
            }
        }))
    }

    pub async fn list_by_owner(
        &self,
        owner_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        Project::list_by_owner(&self.pool, owner_id, limit, offset).await
    }

    pub async fn search(
        &self,
        owner_id: &str,
        query: &str,
        skill_level: Option<SkillLevel>,
        project_type: Option<&str>,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        Project::search(&self.pool, owner_id, query, skill_level, project_type).await
    }

    pub async fn update(
        &self,
        id: i64,
        owner_id: &str,
        changes: &UpdateProject,
    ) -> Result<bool, sqlx::Error> {
        Project::update(&self.pool, id, owner_id, changes).await
    }

    pub async fn delete(&self, id: i64, owner_id: &str) -> Result<bool, sqlx::Error> {
        Project::delete(&self.pool, id, owner_id).await
    }

    pub async fn count(&self, owner_id: Option<&str>) -> Result<i64, sqlx::Error> {
        Project::count(&self.pool, owner_id).await
    }

    /// Export a project as `(content, media type)`. Unknown formats and
    /// missing ids both come back as `None`.
    pub async fn export(
        &self,
        id: i64,
        format: &str,
    ) -> Result<Option<(String, &'static str)>, sqlx::Error> {
        let Some(format) = ExportFormat::parse(format) else {
            return Ok(None);
        };
        let Some(project) = self.get(id).await? else {
            return Ok(None);
        };

        let content = match format {
            ExportFormat::Json => serde_json::to_string_pretty(&project)
                .map_err(|e| sqlx::Error::Protocol(e.to_string()))?,
            ExportFormat::Markdown => project.content.clone(),
            ExportFormat::Html => standalone_html(&project),
        };
        Ok(Some((content, format.media_type())))
    }

    /// Seed the fallback catalogue as demo projects for first-run data.
    /// Skips entirely when sample rows already exist.
    pub async fn seed_sample_projects(&self) -> Result<usize, sqlx::Error> {
        if Project::count(&self.pool, Some(SAMPLE_OWNER)).await? > 0 {
            return Ok(0);
        }

        let mut inserted = 0;
        for template in fallback::catalogue() {
            self.save(
                Some(SAMPLE_OWNER),
                template.skill_level,
                template.tech_stack,
                template.project_type,
                template.content,
            )
            .await?;
            inserted += 1;
        }
        info!(inserted, "seeded sample projects");
        Ok(inserted)
    }
}

/// Minimal standalone document wrapping the rendered brief with its
/// metadata, for the html export format.
fn standalone_html(project: &ProjectWithHtml) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <meta charset="utf-8">
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; max-width: 800px; margin: 0 auto; padding: 20px; }}
        pre {{ background: #f4f4f4; border: 1px solid #ddd; border-radius: 4px; padding: 10px; overflow: auto; }}
        code {{ background: #f4f4f4; padding: 2px 4px; border-radius: 3px; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <p><strong>Skill Level:</strong> {skill_level}</p>
    <p><strong>Tech Stack:</strong> {tech_stack}</p>
    <p><strong>Project Type:</strong> {project_type}</p>
    <hr>
    {body}
</body>
</html>"#,
        title = project.title,
        skill_level = project.skill_level,
        tech_stack = project.tech_stack,
        project_type = project.project_type,
        body = project.content_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::DBService;

    async fn service() -> ProjectService {
        let db = DBService::new_in_memory().await.unwrap();
        ProjectService::new(db.pool)
    }

    #[tokio::test]
    async fn save_then_get_round_trips_with_rendered_html() {
        let service = service().await;
        let markdown = "# Chess Trainer\n\nPractice openings against an engine.";
        let id = service
            .save(Some("u1"), SkillLevel::Intermediate, "Rust", "tool", markdown)
            .await
            .unwrap();

        let project = service.get(id).await.unwrap().unwrap();
        assert_eq!(project.content, markdown);
        assert_eq!(project.title, "Chess Trainer");
        assert_eq!(project.content_html, render_markdown(markdown));
    }

    #[tokio::test]
    async fn save_derives_a_title_even_without_a_heading() {
        let service = service().await;
        let id = service
            .save(Some("u1"), SkillLevel::Beginner, "JS", "web", "just a plain first line")
            .await
            .unwrap();
        let project = service.get(id).await.unwrap().unwrap();
        assert_eq!(project.title, "just a plain first line");

        let id = service
            .save(Some("u1"), SkillLevel::Beginner, "JS", "web", "")
            .await
            .unwrap();
        let project = service.get(id).await.unwrap().unwrap();
        assert_eq!(project.title, "Untitled Project");
    }

    #[tokio::test]
    async fn update_then_get_reflects_the_change() {
        let service = service().await;
        let id = service
            .save(Some("u1"), SkillLevel::Beginner, "JS", "web", "# Old Title\n\nBody")
            .await
            .unwrap();

        let changes = UpdateProject {
            title: Some("X".to_string()),
            ..Default::default()
        };
        assert!(service.update(id, "u1", &changes).await.unwrap());
        assert_eq!(service.get(id).await.unwrap().unwrap().title, "X");

        assert!(!service.update(id, "someone_else", &changes).await.unwrap());
    }

    #[tokio::test]
    async fn export_json_markdown_and_html() {
        let service = service().await;
        let markdown = "# Exported\n\nSome **body**.";
        let id = service
            .save(Some("u1"), SkillLevel::Advanced, "Rust", "tool", markdown)
            .await
            .unwrap();

        let (json, media) = service.export(id, "json").await.unwrap().unwrap();
        assert_eq!(media, "application/json");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Exported");
        assert_eq!(value["content"], markdown);
        assert!(value["content_html"].as_str().unwrap().contains("<strong>"));

        let (md, media) = service.export(id, "markdown").await.unwrap().unwrap();
        assert_eq!(media, "text/markdown");
        assert_eq!(md, markdown);

        let (html, media) = service.export(id, "html").await.unwrap().unwrap();
        assert_eq!(media, "text/html");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<strong>Skill Level:</strong> advanced"));
        assert!(html.contains("<strong>body</strong>"));
    }

    #[tokio::test]
    async fn export_unknown_format_or_missing_id_is_none() {
        let service = service().await;
        let id = service
            .save(Some("u1"), SkillLevel::Beginner, "JS", "web", "# T")
            .await
            .unwrap();

        assert!(service.export(id, "pdf").await.unwrap().is_none());
        assert!(service.export(9999, "json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeding_inserts_the_catalogue_once() {
        let service = service().await;
        let inserted = service.seed_sample_projects().await.unwrap();
        assert_eq!(inserted, fallback::catalogue().len());
        assert_eq!(
            service.count(Some(SAMPLE_OWNER)).await.unwrap(),
            inserted as i64
        );

        // Second run is a no-op.
        assert_eq!(service.seed_sample_projects().await.unwrap(), 0);

        // Seeded titles survive the canonical title derivation unchanged.
        let seeded = service
            .search(SAMPLE_OWNER, "portfolio", None, None)
            .await
            .unwrap();
        assert!(
            seeded
                .iter()
                .any(|s| s.title == "Personal Portfolio Website")
        );
    }
}
