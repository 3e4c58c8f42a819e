//! Deferred-Load Script Generator
//!
//! Builds the JavaScript that swaps a block placeholder for its rendered
//! markup. Both load modes share one DOM-replace routine; they differ only
//! in where the HTML string comes from.
//!
//! # Replace algorithm
//! The HTML is parsed into a detached `<div>`. Its top-level element nodes
//! are collected in source order; the first replaces the placeholder and
//! each further one is inserted right after the previous. Text and comment
//! nodes are dropped. Without any element node the placeholder stays.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// == Load Mode ==
/// How the client obtains a deferred block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Blocking XHR issued from an inline script
    Sync,
    /// `<script async>` inserted before the document's first script
    #[default]
    Async,
}

impl LoadMode {
    /// Name of the callback route serving this mode.
    pub fn route_name(self) -> &'static str {
        match self {
            LoadMode::Sync => "block_js_sync_cache",
            LoadMode::Async => "block_js_async_cache",
        }
    }

    pub fn route_path(self) -> &'static str {
        match self {
            LoadMode::Sync => "/_block/js/sync",
            LoadMode::Async => "/_block/js/async",
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadMode::Sync => "sync",
            LoadMode::Async => "async",
        })
    }
}

impl FromStr for LoadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sync" => Ok(LoadMode::Sync),
            "async" => Ok(LoadMode::Async),
            other => Err(format!("unknown load mode `{other}`")),
        }
    }
}

/// DOM id of the placeholder for a dashified block id.
pub fn placeholder_id(dashified_id: &str) -> String {
    format!("block-{dashified_id}")
}

// == Html Source ==
/// Where the replace routine gets its markup from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlSource<'a> {
    /// Blocking GET against the callback URL
    Fetch { url: &'a str },
    /// Markup embedded as a string literal
    Inline { html: &'a str },
}

// == Dom Replace ==
/// A self-invoking script replacing `placeholder` with markup from `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomReplace<'a> {
    pub placeholder: &'a str,
    pub source: HtmlSource<'a>,
}

impl DomReplace<'_> {
    pub fn to_js(&self) -> String {
        let load_html = match self.source {
            HtmlSource::Fetch { url } => format!(
                "var xhr = window.XMLHttpRequest ? new XMLHttpRequest() : new ActiveXObject('Microsoft.XMLHTTP');\n\
                 xhr.open('GET', {url}, false);\n\
                 xhr.setRequestHeader('X-Requested-With', 'XMLHttpRequest');\n\
                 xhr.send('');\n\
                 var html = xhr.responseText;\n",
                url = js_string(url),
            ),
            HtmlSource::Inline { html } => format!("var html = {};\n", js_string(html)),
        };

        format!(
            "(function () {{\n\
             var block = document.getElementById({placeholder});\n\
             if (!block) {{\n\
             return;\n\
             }}\n\
             {load_html}\
             {replace}\
             }})();\n",
            placeholder = js_string(self.placeholder),
            replace = REPLACE_ROUTINE,
        )
    }
}

/// Expects `block` and `html` in scope.
const REPLACE_ROUTINE: &str = "\
var parentNode = block.parentNode,
    div = document.createElement('div'),
    nodes = [],
    anchor,
    i;
div.innerHTML = html;
for (i = 0; i < div.childNodes.length; i++) {
    if (div.childNodes[i].nodeType === 1) {
        nodes.push(div.childNodes[i]);
    }
}
if (nodes.length === 0) {
    return;
}
parentNode.replaceChild(nodes[0], block);
anchor = nodes[0];
for (i = 1; i < nodes.length; i++) {
    parentNode.insertBefore(nodes[i], anchor.nextSibling);
    anchor = nodes[i];
}
";

// == Script Insert ==
/// A script that schedules `url` as an async script before the first
/// `<script>` of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptInsert<'a> {
    pub url: &'a str,
}

impl ScriptInsert<'_> {
    pub fn to_js(&self) -> String {
        format!(
            "(function () {{\n\
             var b = document.createElement('script');\n\
             b.type = 'text/javascript';\n\
             b.async = true;\n\
             b.src = {url};\n\
             var s = document.getElementsByTagName('script')[0];\n\
             s.parentNode.insertBefore(b, s);\n\
             }})();\n",
            url = js_string(self.url),
        )
    }
}

// == Markup ==
/// Placeholder `<div>` holding the loader script for `mode`.
///
/// The script sits inside the placeholder, so the node it replaces is
/// already parsed when it runs.
pub fn deferred_markup(mode: LoadMode, dashified_id: &str, url: &str) -> String {
    let placeholder = placeholder_id(dashified_id);
    let script = match mode {
        LoadMode::Sync => DomReplace {
            placeholder: &placeholder,
            source: HtmlSource::Fetch { url },
        }
        .to_js(),
        LoadMode::Async => ScriptInsert { url }.to_js(),
    };

    format!(
        "<div id=\"{id_attr}\">\n\
         <script type=\"text/javascript\">\n\
         /*<![CDATA[*/\n\
         {script}\
         /*]]>*/\n\
         </script>\n\
         </div>\n",
        id_attr = escape_attribute(&placeholder),
    )
}

/// Script body served by the async callback: replaces the placeholder with
/// `html` without another round trip.
pub fn inline_replace_script(dashified_id: &str, html: &str) -> String {
    let placeholder = placeholder_id(dashified_id);
    DomReplace {
        placeholder: &placeholder,
        source: HtmlSource::Inline { html },
    }
    .to_js()
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Serializes `value` as a double-quoted JavaScript string literal.
///
/// `</` is written as `<\/` so the literal can sit inside a `<script>`
/// element, and U+2028/U+2029 are escaped for pre-ES2019 parsers.
pub fn js_string(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
