//! Caller-facing tool surface.
//!
//! Each tool takes primitive arguments and answers with a single string.
//! Every failure, including a malformed call, comes back as readable text
//! so an automated caller can reason over it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::session::Session;

/// A single tool invocation.
///
/// Serialized with the tool name under `"tool"`:
///
/// ```
/// use pdfnav::tools::ToolCall;
///
/// let call: ToolCall = serde_json::from_str(r#"{"tool":"goto","page":2}"#).unwrap();
/// assert_eq!(call, ToolCall::Goto { page: Some(2), line: None });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolCall {
    /// Go to a page, or a global line
    Goto {
        /// 1-based page number; wins when in range
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page: Option<i64>,
        /// Global line number, used when `page` is missing or out of range
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<i64>,
    },
    /// Show the last `n` lines
    ScrollUp {
        /// Number of lines, negatives count as zero
        n: i64,
    },
    /// Show the first `n` lines
    ScrollDown {
        /// Number of lines, negatives count as zero
        n: i64,
    },
    /// Jump to a search match
    NextSearchMatch {
        /// Case-insensitive substring to look for
        search_term: String,
        /// 1-based match rank; missing, zero or negative means the first
        #[serde(default, skip_serializing_if = "Option::is_none")]
        match_number: Option<i64>,
    },
    /// Clip a global line range into memory
    ClipMemory {
        /// First global line, inclusive
        line_num_start: i64,
        /// Last global line, inclusive
        line_num_end: i64,
    },
    /// Read back everything clipped so far
    UseMemory {
        /// Free-form instruction; the clipped text is returned unchanged
        #[serde(default)]
        prompt: String,
    },
}

impl ToolCall {
    /// Name of the tool this call targets.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::Goto { .. } => "goto",
            ToolCall::ScrollUp { .. } => "scroll_up",
            ToolCall::ScrollDown { .. } => "scroll_down",
            ToolCall::NextSearchMatch { .. } => "next_search_match",
            ToolCall::ClipMemory { .. } => "clip_memory",
            ToolCall::UseMemory { .. } => "use_memory",
        }
    }
}

/// Registration descriptor for one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    /// Tool name as used in [`ToolCall`]
    pub name: &'static str,

    /// Human-readable description
    pub description: &'static str,

    /// JSON schema of the arguments
    pub parameters: Value,
}

/// Dispatches tool calls against one session.
#[derive(Debug, Clone)]
pub struct ToolBox {
    session: Session,
}

impl ToolBox {
    /// Bind the tools to a session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The bound session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Release the bound session.
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run a call and return its text result.
    ///
    /// Integer arguments are clamped into range: negatives become 0 and
    /// values past the target type's maximum saturate.
    pub fn dispatch(&mut self, call: ToolCall) -> String {
        log::debug!("Dispatching {}", call.name());
        match call {
            ToolCall::Goto { page, line } => self
                .session
                .goto(page.map(clamp_u32), line.map(clamp_u32)),
            ToolCall::ScrollUp { n } => self.session.scroll_up(clamp_usize(n)),
            ToolCall::ScrollDown { n } => self.session.scroll_down(clamp_usize(n)),
            ToolCall::NextSearchMatch {
                search_term,
                match_number,
            } => self
                .session
                .search_next_match(&search_term, match_number.map(clamp_usize)),
            ToolCall::ClipMemory {
                line_num_start,
                line_num_end,
            } => {
                // Lines are selected from the clamped range, but the
                // confirmation echoes the caller's arguments.
                self.session
                    .clip(clamp_u32(line_num_start), clamp_u32(line_num_end));
                format!("Clipped lines {} to {}.", line_num_start, line_num_end)
            }
            ToolCall::UseMemory { prompt } => self.session.use_memory(&prompt),
        }
    }

    /// Parse a JSON call and run it.
    pub fn dispatch_json(&mut self, input: &str) -> String {
        match serde_json::from_str::<ToolCall>(input) {
            Ok(call) => self.dispatch(call),
            Err(e) => {
                log::warn!("Rejected tool call: {}", e);
                format!("Invalid tool call: {}", e)
            }
        }
    }

    /// Descriptors for every tool, in a stable order.
    pub fn specs() -> Vec<ToolSpec> {
        vec![
            ToolSpec {
                name: "goto",
                description: "Go to a page or a global line number and render that page. \
                              A valid page wins; a line is highlighted on its page.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "page": { "type": "integer", "description": "Page number (1-indexed)" },
                        "line": { "type": "integer", "description": "Global line number (1-indexed)" }
                    }
                }),
            },
            ToolSpec {
                name: "scroll_up",
                description: "Show the last n lines of the document.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "n": { "type": "integer", "description": "Number of lines" }
                    },
                    "required": ["n"]
                }),
            },
            ToolSpec {
                name: "scroll_down",
                description: "Show the first n lines of the document.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "n": { "type": "integer", "description": "Number of lines" }
                    },
                    "required": ["n"]
                }),
            },
            ToolSpec {
                name: "next_search_match",
                description: "Find a case-insensitive match for a search term and render \
                              its page with the match highlighted.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "search_term": { "type": "string", "description": "Text to search for" },
                        "match_number": { "type": "integer", "description": "1-based match to jump to (default 1)" }
                    },
                    "required": ["search_term"]
                }),
            },
            ToolSpec {
                name: "clip_memory",
                description: "Clip global lines line_num_start to line_num_end (inclusive) into memory.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "line_num_start": { "type": "integer", "description": "First global line" },
                        "line_num_end": { "type": "integer", "description": "Last global line" }
                    },
                    "required": ["line_num_start", "line_num_end"]
                }),
            },
            ToolSpec {
                name: "use_memory",
                description: "Return every clipped line, in clip order, to answer a prompt.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "prompt": { "type": "string", "description": "What the clipped text is for" }
                    },
                    "required": ["prompt"]
                }),
            },
        ]
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

fn clamp_usize(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}
