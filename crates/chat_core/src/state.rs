use std::time::Duration;

use crate::view_model::{AppViewModel, InputView, MessageView};
use crate::{Feed, MessageId, SendGate, Sender, TimerId};

/// Minimum interval between two accepted sends, measured from acceptance.
pub const SEND_COOLDOWN: Duration = Duration::from_millis(2000);

/// Optional controls provided by the hosting front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub load_trigger: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self { load_trigger: true }
    }
}

/// Label state of the data-load trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadControl {
    #[default]
    Ready,
    Busy,
    Completed,
}

impl LoadControl {
    pub fn label(self) -> &'static str {
        match self {
            LoadControl::Ready => "Load Data",
            LoadControl::Busy => "Loading...",
            LoadControl::Completed => "Data Loaded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InputBox {
    text: String,
    rows: usize,
}

impl Default for InputBox {
    fn default() -> Self {
        Self {
            text: String::new(),
            rows: 1,
        }
    }
}

impl InputBox {
    fn set(&mut self, text: String) {
        self.rows = text.split('\n').count().max(1);
        self.text = text;
    }

    fn collapse(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    feed: Feed,
    gate: SendGate,
    input: InputBox,
    load_control: Option<LoadControl>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_controls(Controls::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controls(controls: Controls) -> Self {
        Self {
            feed: Feed::new(),
            gate: SendGate::new(),
            input: InputBox::default(),
            load_control: controls.load_trigger.then_some(LoadControl::Ready),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            messages: self
                .feed
                .messages()
                .iter()
                .map(|message| MessageView {
                    id: message.id(),
                    sender: message.sender(),
                    text: message.text().to_string(),
                    loading: message.is_loading(),
                })
                .collect(),
            input: InputView {
                text: self.input.text.clone(),
                rows: self.input.rows,
            },
            can_send: self.gate.can_send(),
            load_control: self.load_control,
            scroll_anchor: self.feed.newest(),
            dirty: self.dirty,
        }
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn gate(&self) -> &SendGate {
        &self.gate
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn input_text(&self) -> &str {
        &self.input.text
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input.text != text {
            self.input.set(text);
            self.mark_dirty();
        }
    }

    pub(crate) fn insert_input_newline(&mut self) {
        let mut text = std::mem::take(&mut self.input.text);
        text.push('\n');
        self.input.set(text);
        self.mark_dirty();
    }

    pub(crate) fn collapse_input(&mut self) {
        self.input.collapse();
        self.mark_dirty();
    }

    pub(crate) fn append_message(&mut self, sender: Sender, text: String) -> MessageId {
        self.mark_dirty();
        self.feed.append(sender, text)
    }

    pub(crate) fn append_loading(&mut self) -> MessageId {
        self.mark_dirty();
        self.feed.append_loading()
    }

    pub(crate) fn remove_loading(&mut self, id: MessageId) -> bool {
        let removed = self.feed.remove_loading(id);
        if removed {
            self.mark_dirty();
        }
        removed
    }

    pub(crate) fn try_acquire_gate(&mut self) -> Option<TimerId> {
        let timer = self.gate.try_acquire()?;
        self.mark_dirty();
        Some(timer)
    }

    pub(crate) fn release_gate(&mut self, timer: TimerId) -> bool {
        let released = self.gate.release(timer);
        if released {
            self.mark_dirty();
        }
        released
    }

    pub(crate) fn has_load_trigger(&self) -> bool {
        self.load_control.is_some()
    }

    pub(crate) fn set_load_control(&mut self, control: LoadControl) {
        if let Some(current) = self.load_control.as_mut() {
            if *current != control {
                *current = control;
                self.dirty = true;
            }
        }
    }
}
