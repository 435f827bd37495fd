use std::fmt;

/// Text shown by the transient placeholder while a reply is pending.
pub const LOADING_TEXT: &str = "...";

/// Opaque identifier of one feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

/// One entry in the feed. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    id: MessageId,
    sender: Sender,
    text: String,
    loading: bool,
}

impl ChatMessage {
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True for the transient placeholder shown while awaiting a reply.
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Ordered, append-only list of chat messages.
///
/// Only loading placeholders can ever be removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feed {
    messages: Vec<ChatMessage>,
    last_id: u64,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> MessageId {
        self.push(sender, text.into(), false)
    }

    pub fn append_loading(&mut self) -> MessageId {
        self.push(Sender::Ai, LOADING_TEXT.to_string(), true)
    }

    /// Removes the placeholder tagged `id`.
    ///
    /// Returns false and leaves the feed untouched when no placeholder with
    /// that id is present.
    pub fn remove_loading(&mut self, id: MessageId) -> bool {
        match self
            .messages
            .iter()
            .position(|message| message.id == id && message.loading)
        {
            Some(index) => {
                self.messages.remove(index);
                true
            }
            None => false,
        }
    }

    /// Entry the view should be scrolled to.
    pub fn newest(&self) -> Option<MessageId> {
        self.messages.last().map(|message| message.id)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, sender: Sender, text: String, loading: bool) -> MessageId {
        self.last_id += 1;
        let id = MessageId(self.last_id);
        self.messages.push(ChatMessage {
            id,
            sender,
            text,
            loading,
        });
        id
    }
}
