//! Static catalogue of pre-authored project briefs, used whenever the
//! completion API is unavailable or fails. Built once on first use and
//! never mutated, so it is safe to share across concurrent requests.

use db::models::project::SkillLevel;
use once_cell::sync::Lazy;

/// One pre-authored brief. `tech_stack` is the stack the brief was written
/// against, used when the catalogue is seeded as demo data.
pub struct FallbackTemplate {
    pub skill_level: SkillLevel,
    pub project_type: &'static str,
    pub tech_stack: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

/// A selected brief. The title is the template's literal title on a direct
/// hit, or synthesized from the request on a catalogue miss.
#[derive(Debug, Clone)]
pub struct FallbackSelection {
    pub title: String,
    pub content: String,
}

/// Select a brief for the request. Total: a miss falls back to the
/// beginner web entry with a title synthesized from the requested tech
/// stack and project type, so the result is never empty.
pub fn select(
    skill_level: SkillLevel,
    project_type: &str,
    tech_stack: &str,
) -> FallbackSelection {
    if let Some(template) = TEMPLATES.iter().find(|t| {
        t.skill_level == skill_level && t.project_type.eq_ignore_ascii_case(project_type.trim())
    }) {
        return FallbackSelection {
            title: template.title.to_string(),
            content: template.content.to_string(),
        };
    }

    let default = &TEMPLATES[0];
    FallbackSelection {
        title: format!("{} {} Project", tech_stack.trim(), project_type.trim()),
        content: default.content.to_string(),
    }
}

/// The full catalogue, for seeding demo data.
pub fn catalogue() -> &'static [FallbackTemplate] {
    &TEMPLATES
}

// The first entry doubles as the miss default; keep it (beginner, web).
static TEMPLATES: Lazy<Vec<FallbackTemplate>> = Lazy::new(|| {
    vec![
        FallbackTemplate {
            skill_level: SkillLevel::Beginner,
            project_type: "web",
            tech_stack: "HTML, CSS, JavaScript",
            title: "Personal Portfolio Website",
            content: r#"# Personal Portfolio Website

## Overview
Build a responsive portfolio website that introduces you, showcases your work, and gives visitors a way to get in touch. Everything runs in the browser, so you only need a text editor to get started.

## Learning Objectives
- Semantic HTML structure
- CSS layout with flexbox and grid
- Responsive design principles
- Basic DOM manipulation with JavaScript

## Features
- Hero section with your name and a short introduction
- Projects section with cards for at least three projects
- About section with a photo and a longer bio
- Contact form with client-side validation
- Navigation bar that collapses on small screens

## Getting Started
1. Create a folder with `index.html`, `styles.css` and `script.js`
2. Sketch the page layout on paper before writing any markup
3. Build the HTML skeleton first, then style section by section

## Starter Code
```html
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>My Portfolio</title>
    <link rel="stylesheet" href="styles.css">
</head>
<body>
    <header class="hero">
        <h1>Your Name</h1>
        <p>A short line about what you do</p>
    </header>
    <script src="script.js"></script>
</body>
</html>
```

## Development Steps
1. Write the HTML structure for every section
2. Style the hero and navigation, checking the layout at several widths
3. Add the project cards and about section
4. Wire up form validation in JavaScript
5. Test on a phone-sized viewport and fix anything that overflows

## Testing
Resize the browser window through phone, tablet and desktop widths; submit the contact form empty and confirm validation messages appear.

## Resources
- MDN Web Docs for HTML, CSS and JavaScript references
- Google Fonts for typography
- Unsplash for free placeholder images

## Extensions
- Add a dark-mode toggle persisted in `localStorage`
- Animate section reveals on scroll
"#,
        },
        FallbackTemplate {
            skill_level: SkillLevel::Intermediate,
            project_type: "web",
            tech_stack: "JavaScript, Flask, SQLite",
            title: "Task Management Application",
            content: r#"# Task Management Application

## Overview
Build a task manager with a small backend API, a relational database and a JavaScript frontend. The focus is on designing a clean REST surface and keeping server and client responsibilities separate.

## Learning Objectives
- REST API design
- Relational schema design and migrations
- Fetch-based frontend/backend integration
- Input validation on both sides of the wire

## Features
- Create, list, update and delete tasks
- Categories and priorities per task
- Filtering and sorting in the list view
- Persistent storage in SQLite

## API Surface
- `GET /api/tasks` — list tasks
- `POST /api/tasks` — create a task
- `PUT /api/tasks/:id` — update a task
- `DELETE /api/tasks/:id` — delete a task

## Database Schema
```sql
CREATE TABLE tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT DEFAULT 'pending',
    priority INTEGER DEFAULT 1,
    category TEXT,
    due_date DATE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
```

## Development Steps
1. Define the schema and write a small migration script
2. Implement the API endpoints with validation and error responses
3. Build the list view, then the create/edit forms
4. Add filtering and sorting query parameters to the list endpoint
5. Handle API errors in the UI with user-visible messages

## Testing
Exercise every endpoint with curl or an HTTP client before touching the frontend; then test the full flow in the browser, including validation failures.

## Resources
- REST API design guides
- SQLite documentation on indexes and query planning

## Extensions
- Task sharing between users
- Email reminders for due dates
- A burndown chart of completed tasks
"#,
        },
        FallbackTemplate {
            skill_level: SkillLevel::Advanced,
            project_type: "web",
            tech_stack: "TypeScript, WebSockets, Redis",
            title: "Real-Time Collaborative Whiteboard",
            content: r#"# Real-Time Collaborative Whiteboard

## Overview
Design and build a whiteboard multiple users can draw on simultaneously, with low-latency synchronization and conflict-free state convergence. The interesting work is architectural: protocol design, state reconciliation and presence.

## Learning Objectives
- WebSocket protocol design
- Operational transforms or CRDTs for concurrent edits
- Backpressure and reconnection handling
- Horizontal scaling of stateful connections

## Core Requirements
- Shared canvas with freehand drawing, shapes and text
- Per-user cursors and presence indicators
- Offline edits merged on reconnect
- Session history with replay

## Architecture Notes
Keep the authoritative state on the server and treat client canvases as projections. Define a compact binary or JSON message schema early; versioning it later is much harder. Use a pub/sub layer to fan messages out once you run more than one server instance.

## Implementation Strategy
1. Start with a single-room, single-server prototype and a naive full-state broadcast
2. Replace full-state sync with incremental operations
3. Introduce conflict resolution (start with last-writer-wins, then evaluate a CRDT)
4. Add persistence and replay
5. Load-test with simulated clients and measure end-to-end latency

## Technical Challenges
- Ordering guarantees across reconnects
- Garbage-collecting tombstones in the shared state
- Keeping render performance stable as the document grows

## Testing
Drive the protocol with headless clients performing randomized concurrent edits and assert convergence; latency and throughput measurements belong in CI, not just on your laptop.

## Resources
- CRDT literature surveys
- WebSocket RFC 6455

## Extensions
- End-to-end encryption of board content
- Export to SVG
"#,
        },
        FallbackTemplate {
            skill_level: SkillLevel::Beginner,
            project_type: "tool",
            tech_stack: "Python",
            title: "Command-Line Task Tracker",
            content: r#"# Command-Line Task Tracker

## Overview
Build a small command-line tool for tracking daily tasks. Tasks are stored in a plain JSON file, so you can concentrate on program structure, argument handling and file I/O.

## Learning Objectives
- Parsing command-line arguments
- Reading and writing structured files
- Designing small, single-purpose functions
- Handling missing or corrupt data gracefully

## Features
- `add` a task with a description
- `list` tasks, optionally filtered by status
- `done` to mark a task complete
- `remove` to delete a task

## Getting Started
1. Create a project folder and a `tasks.json` file containing `[]`
2. Write a function that loads the file and one that saves it
3. Add one subcommand at a time, testing each before moving on

## Starter Code
```python
import json
from pathlib import Path

TASKS_FILE = Path("tasks.json")

def load_tasks():
    if not TASKS_FILE.exists():
        return []
    return json.loads(TASKS_FILE.read_text())
```

## Development Steps
1. Implement load/save helpers
2. Implement `add` and `list`
3. Implement `done` and `remove` with friendly errors for unknown ids
4. Add a `--status` filter to `list`

## Testing
Run each command by hand after every step; delete `tasks.json` and confirm the tool recreates it instead of crashing.

## Resources
- Standard-library documentation for argument parsing and JSON

## Extensions
- Due dates with overdue highlighting
- Colored output
"#,
        },
        FallbackTemplate {
            skill_level: SkillLevel::Intermediate,
            project_type: "tool",
            tech_stack: "Rust, SQLite",
            title: "Personal Knowledge Base CLI",
            content: r#"# Personal Knowledge Base CLI

## Overview
Build a command-line notes tool backed by a local database with full-text search. The project exercises schema design, indexing and building a pleasant terminal interface on top of a storage layer.

## Learning Objectives
- Embedding a relational database in a CLI tool
- Full-text search and ranking
- Structured error handling across layers
- Designing a stable command surface

## Features
- Capture notes from arguments, stdin or an editor
- Tagging and tag-based listing
- Full-text search with highlighted matches
- Export a note or a tag's notes to markdown

## Implementation Details
Keep storage behind a small module boundary: the command layer should not contain SQL. Store timestamps in UTC and convert at the edge. Treat search as a ranked query over a contentless FTS table joined back to the notes table.

## Development Steps
1. Define the schema and a migration on first run
2. Implement capture and list
3. Add tags as a many-to-many table
4. Wire up full-text search
5. Add export and polish help output

## Testing
Unit-test the storage module against an in-memory database; add one integration test per command that runs the real binary against a temp directory.

## Resources
- SQLite FTS5 documentation
- CLI design guidelines

## Extensions
- Encrypted notes
- Sync via a remote git repository
"#,
        },
        FallbackTemplate {
            skill_level: SkillLevel::Advanced,
            project_type: "tool",
            tech_stack: "JavaScript, Python, SQLite",
            title: "Code Review Assistant",
            content: r#"# Code Review Assistant

## Overview
Create a tool that helps developers perform automated code reviews using static analysis and AI assistance. The hard parts are parsing, heuristics for code quality, and integrating multiple analysis sources into one coherent report.

## Architecture
- Analysis engine that parses source files and runs rule-based checks
- Persistence layer storing projects and review comments
- Integration with a hosted git provider for repository access
- Optional language-model pass that explains findings in prose

## Key Components

### Static Analysis Engine
- Parse code in at least two languages
- Detect common code smells and anti-patterns
- Check style-guideline violations
- Flag likely performance issues

### AI Integration
- Generate natural-language explanations of findings
- Suggest concrete improvements with diffs
- Link findings to relevant documentation

### Version Control Integration
- Clone repositories and walk commit ranges
- Compare changes between commits
- Comment directly on pull requests

## Technical Challenges
- Building efficient parsers for multiple languages
- Developing heuristics that keep the false-positive rate low
- Handling large repositories without rescanning the world
- Presenting findings so reviewers trust and act on them

## Implementation Strategy
1. Start with a focused scope (one or two languages)
2. Build the core analysis engine with a plain-text reporter
3. Add the persistence layer and incremental scanning
4. Integrate with the git provider
5. Layer the AI explanations on top of confirmed findings

## Testing
Maintain a corpus of fixture repositories with known findings and assert the analyzer's output against golden files; mutation-test the heuristics.

## Resources
- Language parser and AST tooling documentation
- Published style guides for your target languages

## Extensions
- Editor integration surfacing findings inline
- Historical trend dashboards per repository
"#,
        },
    ]
});
