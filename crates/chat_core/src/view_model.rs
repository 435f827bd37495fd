use crate::{LoadControl, MessageId, Sender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub text: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub messages: Vec<MessageView>,
    pub input: InputView,
    pub can_send: bool,
    /// `None` when the deployment has no load trigger.
    pub load_control: Option<LoadControl>,
    /// Newest entry; the feed auto-scrolls here after every append.
    pub scroll_anchor: Option<MessageId>,
    pub dirty: bool,
}
