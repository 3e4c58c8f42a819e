//! Block Entity Module
//!
//! Defines the block record as read from the document store.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{dashify, Settings};

/// Advisory lifetime, in seconds, of a block's rendered artifact.
pub const DEFAULT_BLOCK_TTL: u64 = 86_400;

// == Block Kind ==
/// Model variant of a block, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockKind {
    /// Title plus an HTML body emitted as-is
    #[serde(rename = "cmf.block.simple")]
    Simple {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        body: String,
    },
    /// Plain text, escaped on render
    #[serde(rename = "cmf.block.string")]
    Text {
        #[serde(default)]
        body: String,
    },
    /// Output of a named action invoked with fixed request parameters
    #[serde(rename = "cmf.block.action")]
    Action {
        #[serde(default)]
        action_name: Option<String>,
        #[serde(default)]
        request_params: BTreeMap<String, String>,
    },
    /// Renders its children in store order
    #[serde(rename = "cmf.block.container")]
    Container,
    /// Container whose children are laid out as slides
    #[serde(rename = "cmf.block.slideshow")]
    Slideshow {
        #[serde(default)]
        title: Option<String>,
    },
}

impl BlockKind {
    /// Type discriminator, identical to the serialized `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            BlockKind::Simple { .. } => "cmf.block.simple",
            BlockKind::Text { .. } => "cmf.block.string",
            BlockKind::Action { .. } => "cmf.block.action",
            BlockKind::Container => "cmf.block.container",
            BlockKind::Slideshow { .. } => "cmf.block.slideshow",
        }
    }

    /// Whether this variant owns an ordered list of child blocks.
    pub fn supports_children(&self) -> bool {
        matches!(self, BlockKind::Container | BlockKind::Slideshow { .. })
    }
}

// == Block ==
/// A unit of renderable content.
///
/// `parent` holds the parent's identifier only; children are found by
/// querying the store for blocks that point back at this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    kind: BlockKind,
    #[serde(default)]
    settings: Settings,
    #[serde(default = "default_publishable", alias = "enabled")]
    publishable: bool,
    #[serde(default)]
    publish_start: Option<DateTime<Utc>>,
    #[serde(default)]
    publish_end: Option<DateTime<Utc>>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default = "default_ttl")]
    ttl: u64,
    #[serde(default)]
    locale: Option<String>,
}

fn default_publishable() -> bool {
    true
}

fn default_ttl() -> u64 {
    DEFAULT_BLOCK_TTL
}

impl Block {
    // == Constructor ==
    /// Creates an enabled, never-updated block with no publish window.
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind,
            settings: Settings::new(),
            publishable: true,
            publish_start: None,
            publish_end: None,
            created_at: None,
            updated_at: None,
            parent: None,
            ttl: DEFAULT_BLOCK_TTL,
            locale: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent: &Block) -> Self {
        self.parent = Some(parent.id.clone());
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.touch(updated_at);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_setting(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.settings.set(name, value);
        self
    }

    // == Identity ==
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn dashified_id(&self) -> String {
        dashify(&self.id)
    }

    pub fn dashified_type(&self) -> String {
        dashify(self.type_name())
    }

    // == Settings ==
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    // == Publishing ==
    /// `enabled` and `publishable` are the same flag.
    pub fn is_enabled(&self) -> bool {
        self.publishable
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.publishable = enabled;
    }

    pub fn publish_start(&self) -> Option<DateTime<Utc>> {
        self.publish_start
    }

    pub fn publish_end(&self) -> Option<DateTime<Utc>> {
        self.publish_end
    }

    pub fn set_publish_window(
        &mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) {
        self.publish_start = start;
        self.publish_end = end;
    }

    // == Lifecycle ==
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Records a modification; the first touch also fixes `created_at`.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.created_at.get_or_insert(at);
        self.updated_at = Some(at);
    }

    // == Hierarchy ==
    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn set_parent(&mut self, parent: Option<&Block>) {
        self.parent = parent.map(|p| p.id.clone());
    }

    pub fn supports_children(&self) -> bool {
        self.kind.supports_children()
    }

    // == Cache Lifetime ==
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    pub fn set_ttl(&mut self, ttl: u64) {
        self.ttl = ttl;
    }

    // == Translation ==
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_locale(&mut self, locale: Option<String>) {
        self.locale = locale;
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
