//! Prompt construction for personalized project briefs.

use db::models::project::SkillLevel;

/// System + user message pair for the completion API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPrompt {
    pub system: String,
    pub user: String,
}

const SYSTEM_PROMPT: &str = "You are an AI mentor specialized in generating personalized coding projects. \
Your task is to create practical, educational project ideas tailored to the user's skill level and interests. \
Structure your response in markdown format with clear sections and code examples where appropriate. \
Be specific with project requirements and implementation details.";

const BEGINNER_GUIDANCE: &str = r#"- Project should be achievable in 1-2 days
- Include detailed step-by-step instructions
- Provide complete starter code for critical components
- Explain code concepts at a basic level
- Suggest learning resources for unfamiliar concepts
- Break the project down into small, manageable tasks
- Focus on fundamentals rather than advanced patterns"#;

const INTERMEDIATE_GUIDANCE: &str = r#"- Project should be achievable in 3-7 days
- Provide project structure and architecture guidance
- Include starter code only for complex sections
- Assume familiarity with basic programming concepts
- Focus on best practices and intermediate patterns
- Suggest ways to extend the project for additional learning"#;

const ADVANCED_GUIDANCE: &str = r#"- Project should be challenging and take 1-3 weeks
- Focus on high-level architecture and technical decisions
- Minimal code examples (pseudocode or skeleton only)
- Introduce advanced concepts and design patterns
- Emphasize scalability, performance and code quality
- Suggest areas for creative problem-solving"#;

/// Build the prompt pair for one generation request. Pure and
/// deterministic: the same inputs always produce the same prompt.
pub fn build_project_prompt(
    skill_level: SkillLevel,
    tech_stack: &str,
    project_type: &str,
) -> ProjectPrompt {
    let guidance = match skill_level {
        SkillLevel::Beginner => BEGINNER_GUIDANCE,
        SkillLevel::Intermediate => INTERMEDIATE_GUIDANCE,
        SkillLevel::Advanced => ADVANCED_GUIDANCE,
    };

    let user = format!(
        r#"Generate a coding project for a {skill_level} developer with the following criteria:
Tech Stack: {tech_stack}
Project Type: {project_type}

Requirements:
{guidance}

Format your response with the following sections:
1. Project Title (a creative, descriptive name, as a markdown heading)
2. Overview (brief description of the project)
3. Learning Objectives (what skills will be practiced)
4. Features (what the project should accomplish)
5. Implementation Details (architecture, components, etc.)
6. Getting Started (setup instructions)
7. Development Steps (breakdown of implementation tasks)
8. Code Examples (key components with explanations)
9. Testing (how to verify functionality)
10. Resources (helpful documentation, tutorials)
11. Extensions (optional ways to enhance the project)

Make sure all code examples are syntactically correct and properly formatted for the specified tech stack."#
    );

    ProjectPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic() {
        let a = build_project_prompt(SkillLevel::Beginner, "HTML, CSS", "web");
        let b = build_project_prompt(SkillLevel::Beginner, "HTML, CSS", "web");
        assert_eq!(a, b);
    }

    #[test]
    fn prompt_embeds_the_inputs() {
        let prompt = build_project_prompt(SkillLevel::Intermediate, "Rust, SQLite", "tool");
        assert!(prompt.user.contains("intermediate developer"));
        assert!(prompt.user.contains("Tech Stack: Rust, SQLite"));
        assert!(prompt.user.contains("Project Type: tool"));
        assert!(!prompt.system.is_empty());
    }

    #[test]
    fn guidance_differs_per_tier() {
        let beginner = build_project_prompt(SkillLevel::Beginner, "JS", "web");
        let advanced = build_project_prompt(SkillLevel::Advanced, "JS", "web");
        assert_ne!(beginner.user, advanced.user);
        assert!(beginner.user.contains("step-by-step instructions"));
        assert!(advanced.user.contains("high-level architecture"));
    }

    #[test]
    fn prompt_lists_the_output_sections() {
        let prompt = build_project_prompt(SkillLevel::Beginner, "Python", "web");
        for section in [
            "Project Title",
            "Learning Objectives",
            "Development Steps",
            "Extensions",
        ] {
            assert!(prompt.user.contains(section), "missing section {section}");
        }
    }
}
