//! Simulated conversational assistant.
//!
//! Replies are canned text picked by keyword; no model is consulted. The
//! conversation log, greeting and quick actions live here too.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use gridpad_engine::Scalar;

pub const GREETING: &str = "Hello! I'm your AI spreadsheet assistant. I can help you analyze data, \
create formulas, join tables, and much more. Upload a file or ask me anything!";

/// Produces a reply for free text and the active sheet's stored matrix.
pub trait Assistant: Send + Sync {
    fn respond(&self, input: &str, matrix: &[Vec<Scalar>]) -> String;
}

/// Keyword-matching assistant. Groups are checked in order; the first hit wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAssistant;

impl Assistant for KeywordAssistant {
    fn respond(&self, input: &str, matrix: &[Vec<Scalar>]) -> String {
        let lower = input.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if has(&["analyze", "summary"]) {
            let rows = matrix.len();
            let cols = matrix.first().map_or(0, |r| r.len());
            let shape = if cols > 0 {
                "structured information"
            } else {
                "no data yet"
            };
            return format!(
                "I can see you have {} rows and {} columns of data. The dataset appears to contain {}. \
Would you like me to perform statistical analysis or identify patterns?",
                rows, cols, shape
            );
        }

        if has(&["formula", "calculate"]) {
            return "I can help you create formulas! Common ones include:\n\
• SUM(A1:A10) - Add up values\n\
• AVERAGE(B1:B10) - Calculate average\n\
• IF(C1>100,\"High\",\"Low\") - Conditional logic\n\
• VLOOKUP(D1,A:B,2,FALSE) - Lookup values\n\n\
What calculation do you need?"
                .to_string();
        }

        if has(&["join", "merge"]) {
            return "I can help you join datasets! To merge tables, I'll need:\n\
• The key columns to match on\n\
• Which type of join (inner, left, right, full)\n\
• How to handle conflicts\n\n\
Upload your files and tell me which columns to match!"
                .to_string();
        }

        if has(&["chart", "graph"]) {
            return "Great! I can suggest the best chart type based on your data:\n\
• Line charts for trends over time\n\
• Bar charts for comparisons\n\
• Pie charts for parts of a whole\n\
• Scatter plots for correlations\n\n\
What aspect of your data would you like to visualize?"
                .to_string();
        }

        format!(
            "I understand you want help with: \"{}\". I can assist with data analysis, formula creation, \
table joins, visualizations, and much more. Could you provide more details about what you'd like to accomplish?",
            input
        )
    }
}

/// A canned prompt offered next to the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Analyze Data",
        prompt: "analyze this dataset",
    },
    QuickAction {
        label: "Create Formula",
        prompt: "help me create a formula",
    },
    QuickAction {
        label: "Join Tables",
        prompt: "help me join two tables",
    },
    QuickAction {
        label: "Make Chart",
        prompt: "suggest a chart for this data",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Conversation log plus the user message still waiting for its reply.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending_reply: Option<u64>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Starts with the assistant's greeting.
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
            pending_reply: None,
        };
        conversation.push(Role::Assistant, GREETING);
        conversation
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn is_pending(&self) -> bool {
        self.pending_reply.is_some()
    }

    /// Id of the user message awaiting a reply.
    pub fn pending_reply(&self) -> Option<u64> {
        self.pending_reply
    }

    pub(crate) fn set_pending_reply(&mut self, message_id: Option<u64>) {
        self.pending_reply = message_id;
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
        id
    }

    /// Log an upload from the chat panel as a user message.
    pub fn record_upload<S: AsRef<str>>(&mut self, names: &[S]) -> u64 {
        let joined = names
            .iter()
            .map(|n| n.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        self.push(
            Role::User,
            format!("Uploaded {} file(s): {}", names.len(), joined),
        )
    }
}

/// Wait `delay`, then compose the reply.
pub async fn compose_reply(
    assistant: Arc<dyn Assistant>,
    input: String,
    matrix: Vec<Vec<Scalar>>,
    delay: Duration,
) -> String {
    if !delay.is_zero() {
        smol::Timer::after(delay).await;
    }
    assistant.respond(&input, &matrix)
}
