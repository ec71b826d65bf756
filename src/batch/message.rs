//! Commit message resolution

use rand::seq::SliceRandom;

const PREFIXES: &[&str] = &[
    "Update",
    "Enhance",
    "Fix",
    "Refactor",
    "Improve",
    "Optimize",
    "Add",
    "Remove",
    "Modify",
    "Restructure",
    "Clean up",
];

const AREAS: &[&str] = &[
    "codebase",
    "functionality",
    "structure",
    "design",
    "performance",
    "documentation",
    "configuration",
    "dependencies",
    "features",
    "UI",
];

const QUALIFIERS: &[&str] = &[
    "for better maintainability",
    "to improve user experience",
    "for compatibility with latest standards",
    "to address technical debt",
    "for enhanced security",
    "to optimize resource usage",
    "based on feedback",
    "following best practices",
];

/// Commit message for a batch run: a caller-supplied literal, or one
/// generated per repository at commit time
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitMessage {
    /// Generate a fresh message for every commit
    Auto,
    /// Use this exact message for every commit
    Literal(String),
}

impl CommitMessage {
    /// Resolves to the message text that will reach `git commit`/the
    /// commit tool. Generated content is cosmetic; only its presence is
    /// contractual.
    pub fn resolve(&self) -> String {
        match self {
            CommitMessage::Literal(message) => message.clone(),
            CommitMessage::Auto => generate_commit_message(),
        }
    }
}

/// Composes a commit message from a random prefix, area and qualifier
pub fn generate_commit_message() -> String {
    let mut rng = rand::thread_rng();
    // The lists are non-empty constants, so choose() cannot fail
    let prefix = PREFIXES.choose(&mut rng).unwrap_or(&PREFIXES[0]);
    let area = AREAS.choose(&mut rng).unwrap_or(&AREAS[0]);
    let qualifier = QUALIFIERS.choose(&mut rng).unwrap_or(&QUALIFIERS[0]);
    format!("{} {} {}", prefix, area, qualifier)
}
