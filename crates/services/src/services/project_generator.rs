//! Generation pipeline: build prompt, attempt the completion API, fall
//! back to a static brief on any failure, normalize into a draft.

use db::models::project::SkillLevel;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::{info, warn};

use super::fallback;
use super::groq_api::{GroqApiClient, GroqApiError, Message};
use super::markdown::{derive_title, render_markdown};
use super::prompt::build_project_prompt;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Where a draft's content came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DraftSource {
    Ai,
    Fallback,
}

/// An in-memory generation result, not yet persisted. `content_html` is
/// always `render_markdown(content_markdown)`; the markdown is the source
/// of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub skill_level: SkillLevel,
    pub tech_stack: String,
    pub project_type: String,
    pub content_markdown: String,
    pub content_html: String,
    pub source: DraftSource,
}

/// Orchestrates one generation request end to end. Remote failures of any
/// kind degrade to fallback content; only invalid caller input surfaces as
/// an error.
pub struct ProjectGenerator {
    client: GroqApiClient,
}

impl ProjectGenerator {
    pub fn new(client: GroqApiClient) -> Self {
        Self { client }
    }

    pub fn from_env() -> Result<Self, GroqApiError> {
        Ok(Self::new(GroqApiClient::from_env()?))
    }

    pub async fn generate(
        &self,
        skill_level: SkillLevel,
        tech_stack: &str,
        project_type: &str,
    ) -> Result<ProjectDraft, GenerateError> {
        if tech_stack.trim().is_empty() {
            return Err(GenerateError::MissingField("tech_stack"));
        }
        if project_type.trim().is_empty() {
            return Err(GenerateError::MissingField("project_type"));
        }

        let prompt = build_project_prompt(skill_level, tech_stack, project_type);
        let messages = vec![Message::system(prompt.system), Message::user(prompt.user)];

        let draft = match self.client.complete(messages).await {
            Ok(raw) => {
                info!(%skill_level, project_type, "generated project brief");
                assemble(
                    derive_title(&raw),
                    raw,
                    skill_level,
                    tech_stack,
                    project_type,
                    DraftSource::Ai,
                )
            }
            Err(e) => {
                warn!(error = %e, %skill_level, project_type, "completion API unavailable, using fallback template");
                let selection = fallback::select(skill_level, project_type, tech_stack);
                assemble(
                    selection.title,
                    selection.content,
                    skill_level,
                    tech_stack,
                    project_type,
                    DraftSource::Fallback,
                )
            }
        };

        Ok(draft)
    }
}

fn assemble(
    title: String,
    content_markdown: String,
    skill_level: SkillLevel,
    tech_stack: &str,
    project_type: &str,
    source: DraftSource,
) -> ProjectDraft {
    let content_html = render_markdown(&content_markdown);
    ProjectDraft {
        title,
        skill_level,
        tech_stack: tech_stack.to_string(),
        project_type: project_type.to_string(),
        content_markdown,
        content_html,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::groq_api::GroqApiConfig;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator_without_credential() -> ProjectGenerator {
        let client = GroqApiClient::new(GroqApiConfig {
            api_key: None,
            base_url: "http://127.0.0.1:1/unreachable".to_string(),
            ..GroqApiConfig::default()
        })
        .unwrap();
        ProjectGenerator::new(client)
    }

    async fn generator_against(server: &MockServer) -> ProjectGenerator {
        let client = GroqApiClient::new(GroqApiConfig {
            api_key: Some("test-key".to_string()),
            base_url: server.uri(),
            ..GroqApiConfig::default()
        })
        .unwrap();
        ProjectGenerator::new(client)
    }

    #[tokio::test]
    async fn missing_credential_yields_the_fallback_template() {
        let generator = generator_without_credential();
        let draft = generator
            .generate(SkillLevel::Beginner, "HTML, CSS", "web")
            .await
            .unwrap();

        assert_eq!(draft.title, "Personal Portfolio Website");
        assert_eq!(draft.source, DraftSource::Fallback);
        assert!(!draft.content_markdown.is_empty());
        assert_eq!(draft.content_html, render_markdown(&draft.content_markdown));
    }

    #[tokio::test]
    async fn every_tier_generates_a_non_empty_draft() {
        let generator = generator_without_credential();
        for level in [
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
        ] {
            for kind in ["web", "tool", "embedded"] {
                let draft = generator.generate(level, "Rust", kind).await.unwrap();
                assert!(!draft.title.is_empty(), "{level}/{kind} produced no title");
                assert!(!draft.content_markdown.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn remote_success_is_processed_into_an_ai_draft() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant",
                    "content": "# Weather Dashboard\n\nBuild a dashboard showing live weather."}}]
            })))
            .mount(&server)
            .await;

        let generator = generator_against(&server).await;
        let draft = generator
            .generate(SkillLevel::Intermediate, "JavaScript", "web")
            .await
            .unwrap();

        assert_eq!(draft.source, DraftSource::Ai);
        assert_eq!(draft.title, "Weather Dashboard");
        assert!(draft.content_markdown.contains("live weather"));
        assert!(draft.content_html.contains("<h1>"));
    }

    #[tokio::test]
    async fn remote_failure_status_routes_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let generator = generator_against(&server).await;
        let draft = generator
            .generate(SkillLevel::Beginner, "HTML, CSS", "web")
            .await
            .unwrap();
        assert_eq!(draft.source, DraftSource::Fallback);
        assert_eq!(draft.title, "Personal Portfolio Website");
    }

    #[tokio::test]
    async fn malformed_remote_shape_routes_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"nope": 1})),
            )
            .mount(&server)
            .await;

        let generator = generator_against(&server).await;
        let draft = generator
            .generate(SkillLevel::Advanced, "Rust", "tool")
            .await
            .unwrap();
        assert_eq!(draft.source, DraftSource::Fallback);
        assert_eq!(draft.title, "Code Review Assistant");
    }

    #[tokio::test]
    async fn empty_required_fields_are_rejected() {
        let generator = generator_without_credential();
        let err = generator
            .generate(SkillLevel::Beginner, "  ", "web")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::MissingField("tech_stack")));

        let err = generator
            .generate(SkillLevel::Beginner, "Rust", "")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::MissingField("project_type")));
    }
}
