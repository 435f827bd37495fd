use chat_logging::{chat_debug, chat_info, preview};

use crate::{AppState, Effect, LoadControl, Msg, Notice, NoticeKind, Sender, SEND_COOLDOWN};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::EnterPressed { shift: true } => {
            state.insert_input_newline();
            Vec::new()
        }
        Msg::EnterPressed { shift: false } | Msg::SendClicked => submit(&mut state),
        Msg::ChatReplied { placeholder, reply } => {
            // Removal and append always happen together, in this order.
            if !state.remove_loading(placeholder) {
                chat_debug!("placeholder {} already removed", placeholder);
            }
            state.append_message(Sender::Ai, reply);
            Vec::new()
        }
        Msg::CooldownElapsed { timer } => {
            if state.release_gate(timer) {
                chat_debug!("send gate reopened (timer {})", timer.get());
            } else {
                chat_debug!("ignoring stale cooldown timer {}", timer.get());
            }
            Vec::new()
        }
        Msg::LoadClicked => {
            if state.has_load_trigger() {
                state.set_load_control(LoadControl::Busy);
                vec![Effect::TriggerLoad]
            } else {
                chat_debug!("load requested but no load trigger is present");
                Vec::new()
            }
        }
        Msg::LoadFinished { message } => {
            if state.has_load_trigger() {
                vec![Effect::Notify(Notice::load_result(message))]
            } else {
                Vec::new()
            }
        }
        Msg::NoticeAcknowledged(NoticeKind::LoadResult) => {
            state.set_load_control(LoadControl::Completed);
            Vec::new()
        }
        Msg::NoticeAcknowledged(NoticeKind::SendThrottled | NoticeKind::Status) => Vec::new(),
        Msg::StatusClicked => vec![Effect::CheckStatus],
        Msg::StatusReported { message } => vec![Effect::Notify(Notice::status(message))],
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if !state.gate().can_send() {
        chat_debug!("send rejected: cooldown active");
        return vec![Effect::Notify(Notice::send_throttled())];
    }

    let text = state.input_text().trim().to_owned();
    if text.is_empty() {
        return Vec::new();
    }

    let Some(timer) = state.try_acquire_gate() else {
        return vec![Effect::Notify(Notice::send_throttled())];
    };

    state.append_message(Sender::User, text.clone());
    state.collapse_input();
    let placeholder = state.append_loading();
    chat_info!(
        "send accepted placeholder={} text={}",
        placeholder,
        preview(&text, 40)
    );

    vec![
        Effect::ArmCooldown {
            timer,
            delay: SEND_COOLDOWN,
        },
        Effect::SendChat { placeholder, text },
    ]
}
