//! Fragment Renderer
//!
//! Renders each block variant into an HTML fragment. Containers pull their
//! children from the loader and render them recursively.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};

use super::{BlockLoader, BlockRenderer, BlockResponse};
use crate::block::{Block, BlockKind};
use crate::error::{BlockCacheError, Result};

/// A controller invoked by action blocks with the block's request params.
pub type ActionFn = Arc<dyn Fn(&BTreeMap<String, String>) -> Result<String> + Send + Sync>;

// == Fragment Renderer ==
pub struct FragmentRenderer {
    loader: Arc<dyn BlockLoader>,
    actions: HashMap<String, ActionFn>,
}

impl FragmentRenderer {
    pub fn new(loader: Arc<dyn BlockLoader>) -> Self {
        Self {
            loader,
            actions: HashMap::new(),
        }
    }

    /// Registers the action an action block refers to by name.
    pub fn with_action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&BTreeMap<String, String>) -> Result<String> + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Arc::new(action));
        self
    }

    /// `ancestors` holds the ids of the containers currently being rendered
    /// above `block`; meeting one of them again means the hierarchy loops.
    fn render_fragment<'a>(
        &'a self,
        block: &'a Block,
        ancestors: &'a [String],
    ) -> BoxFuture<'a, Result<String>> {
        async move {
            if ancestors.iter().any(|id| id == block.id()) {
                return Err(BlockCacheError::Render(format!(
                    "block `{}` is its own ancestor",
                    block.id()
                )));
            }

            let inner = match block.kind() {
                BlockKind::Simple { title, body } => {
                    let mut html = heading(title.as_deref());
                    html.push_str(body);
                    html
                }
                BlockKind::Text { body } => escape_html(body),
                BlockKind::Action {
                    action_name,
                    request_params,
                } => {
                    let name = action_name.as_deref().ok_or_else(|| {
                        BlockCacheError::Render(format!(
                            "action block `{}` has no action name",
                            block.id()
                        ))
                    })?;
                    if !block.is_enabled() {
                        return Ok(String::new());
                    }
                    let action = self.actions.get(name).ok_or_else(|| {
                        BlockCacheError::Render(format!("unknown action `{name}`"))
                    })?;
                    action(request_params)?
                }
                BlockKind::Container => self.render_children(block, ancestors, false).await?,
                BlockKind::Slideshow { title } => {
                    let mut html = heading(title.as_deref());
                    html.push_str(r#"<div class="slides">"#);
                    html.push_str(&self.render_children(block, ancestors, true).await?);
                    html.push_str("</div>");
                    html
                }
            };

            Ok(format!(
                r#"<div class="{}">{}</div>"#,
                escape_html(&wrapper_class(block)),
                inner
            ))
        }
        .boxed()
    }

    async fn render_children(
        &self,
        block: &Block,
        ancestors: &[String],
        as_slides: bool,
    ) -> Result<String> {
        let mut path = ancestors.to_vec();
        path.push(block.id().to_string());

        let mut html = String::new();
        for child in self.loader.children(block).await {
            let fragment = self.render_fragment(&child, &path).await?;
            if as_slides {
                html.push_str(r#"<div class="slide">"#);
                html.push_str(&fragment);
                html.push_str("</div>");
            } else {
                html.push_str(&fragment);
            }
        }
        Ok(html)
    }
}

#[async_trait]
impl BlockRenderer for FragmentRenderer {
    async fn render(&self, block: &Block) -> Result<BlockResponse> {
        let body = self.render_fragment(block, &[]).await?;
        let mut response = BlockResponse::new(body);
        response.set_max_age(block.ttl());
        Ok(response)
    }
}

fn wrapper_class(block: &Block) -> String {
    let extra: String = block.settings().get("class", String::new());
    let base = format!("cmf-block {}", block.dashified_type());
    if extra.is_empty() {
        base
    } else {
        format!("{base} {extra}")
    }
}

fn heading(title: Option<&str>) -> String {
    title
        .map(|t| format!("<h2>{}</h2>", escape_html(t)))
        .unwrap_or_default()
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
