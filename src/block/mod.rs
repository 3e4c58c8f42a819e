//! Block Module
//!
//! In-memory representation of content blocks and their publish rules.

mod entity;
mod publish;
mod settings;

pub use entity::{Block, BlockKind, DEFAULT_BLOCK_TTL};
pub use publish::{PublishWindow, PublishWorkflow};
pub use settings::Settings;

// == Dashify ==
/// Replaces every `/` and `.` with `-`, producing a DOM-safe identifier.
pub fn dashify(src: &str) -> String {
    src.chars()
        .map(|c| match c {
            '/' | '.' => '-',
            other => other,
        })
        .collect()
}
