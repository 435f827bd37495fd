use crate::{MessageId, NoticeKind, TimerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input box (full text).
    InputChanged(String),
    /// Enter key in the input box; with shift it inserts a newline.
    EnterPressed { shift: bool },
    /// User clicked Send.
    SendClicked,
    /// Backend answered the send tagged by `placeholder`.
    ChatReplied { placeholder: MessageId, reply: String },
    /// Cooldown timer fired.
    CooldownElapsed { timer: TimerId },
    /// User clicked the load trigger.
    LoadClicked,
    /// Backend finished (or failed) the data load.
    LoadFinished { message: String },
    /// User asked for the backend status.
    StatusClicked,
    StatusReported { message: String },
    /// User dismissed a blocking notice.
    NoticeAcknowledged(NoticeKind),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
