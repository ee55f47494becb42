/// Chat transcript kept for the lifetime of the popup
use uuid::Uuid;

/// Who wrote a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
    System,
}

impl Sender {
    /// CSS class used by the popup stylesheet
    pub fn as_class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
            Sender::System => "system",
        }
    }
}

/// A single transcript entry. Only provisional entries carry an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Option<String>,
    pub text: String,
    pub sender: Sender,
    pub pending: bool,
}

/// Ordered chat messages; appended to, with single provisional entries removed by id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    revision: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript {
            messages: Vec::new(),
            revision: 0,
        }
    }

    pub fn push(&mut self, text: String, sender: Sender) {
        self.append(ChatMessage {
            id: None,
            text,
            sender,
            pending: false,
        });
    }

    /// Append a pending assistant entry and return its id
    pub fn push_provisional(&mut self, text: String) -> String {
        let id = format!("loading-{}", Uuid::new_v4());
        self.append(ChatMessage {
            id: Some(id.clone()),
            text,
            sender: Sender::Ai,
            pending: true,
        });
        id
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let original_len = self.messages.len();
        self.messages.retain(|m| m.id.as_deref() != Some(id));
        self.messages.len() < original_len
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn has_pending(&self) -> bool {
        self.messages.iter().any(|m| m.pending)
    }

    /// Bumped on every append; the message list scrolls when it changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.revision += 1;
    }
}
