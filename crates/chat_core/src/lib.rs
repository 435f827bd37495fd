//! Chat core: pure interaction controller and view-model helpers.
mod effect;
mod feed;
mod gate;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notice, NoticeKind};
pub use feed::{ChatMessage, Feed, MessageId, Sender, LOADING_TEXT};
pub use gate::{SendGate, TimerId};
pub use msg::Msg;
pub use state::{AppState, Controls, LoadControl, SEND_COOLDOWN};
pub use update::update;
pub use view_model::{AppViewModel, InputView, MessageView};
