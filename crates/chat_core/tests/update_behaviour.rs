use std::sync::Once;

use chat_core::{
    update, AppState, Effect, MessageId, MessageView, Msg, Notice, Sender, SEND_COOLDOWN,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn type_and_send(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SendClicked)
}

fn placeholder_of(effects: &[Effect]) -> MessageId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SendChat { placeholder, .. } => Some(*placeholder),
            _ => None,
        })
        .expect("send effect")
}

fn feed(state: &AppState) -> Vec<(Sender, String, bool)> {
    state
        .view()
        .messages
        .into_iter()
        .map(|MessageView { sender, text, loading, .. }| (sender, text, loading))
        .collect()
}

#[test]
fn empty_and_whitespace_input_is_ignored() {
    init_logging();
    for input in ["", "   ", "\n\t  \n"] {
        let (mut state, effects) = type_and_send(AppState::new(), input);

        assert!(effects.is_empty(), "input {input:?} produced effects");
        assert!(state.view().messages.is_empty());
        assert!(state.view().can_send);
        let _ = state.consume_dirty();
    }
}

#[test]
fn accepted_send_appends_user_then_loading_and_issues_request() {
    init_logging();
    let (state, effects) = type_and_send(AppState::new(), "  Hello  ");
    let placeholder = placeholder_of(&effects);
    let timer = state.gate().pending_timer().expect("armed timer");

    assert_eq!(
        effects,
        vec![
            Effect::ArmCooldown {
                timer,
                delay: SEND_COOLDOWN,
            },
            Effect::SendChat {
                placeholder,
                text: "Hello".to_string(),
            },
        ]
    );
    assert_eq!(
        feed(&state),
        vec![
            (Sender::User, "Hello".to_string(), false),
            (Sender::Ai, "...".to_string(), true),
        ]
    );
    let view = state.view();
    assert!(!view.can_send);
    assert_eq!(view.input.text, "");
    assert_eq!(view.input.rows, 1);
    assert_eq!(view.scroll_anchor, Some(placeholder));
}

#[test]
fn reply_replaces_placeholder_with_ai_message() {
    init_logging();
    let (state, effects) = type_and_send(AppState::new(), "Hello");
    let placeholder = placeholder_of(&effects);

    let (mut state, effects) = update(
        state,
        Msg::ChatReplied {
            placeholder,
            reply: "Hi there".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        feed(&state),
        vec![
            (Sender::User, "Hello".to_string(), false),
            (Sender::Ai, "Hi there".to_string(), false),
        ]
    );
    let view = state.view();
    assert!(view.messages.iter().all(|m| m.id != placeholder));
    assert_eq!(view.scroll_anchor, view.messages.last().map(|m| m.id));
    assert!(state.consume_dirty());
}

#[test]
fn failure_text_is_rendered_as_ordinary_ai_message() {
    init_logging();
    let (state, effects) = type_and_send(AppState::new(), "Hello");
    let placeholder = placeholder_of(&effects);
    let notice = "Error: Could not connect. The server might be waking up (this takes ~30s for free tier). Please try again.";

    let (state, _) = update(
        state,
        Msg::ChatReplied {
            placeholder,
            reply: notice.to_string(),
        },
    );

    let last = state.view().messages.last().cloned().expect("ai message");
    assert_eq!(last.sender, Sender::Ai);
    assert!(last.text.contains("waking up"));
    assert!(!last.loading);
}

#[test]
fn duplicate_reply_does_not_remove_anything_else() {
    init_logging();
    let (state, effects) = type_and_send(AppState::new(), "Hello");
    let placeholder = placeholder_of(&effects);
    let reply = Msg::ChatReplied {
        placeholder,
        reply: "first".to_string(),
    };

    let (state, _) = update(state, reply.clone());
    let (state, _) = update(state, reply);

    assert_eq!(
        feed(&state),
        vec![
            (Sender::User, "Hello".to_string(), false),
            (Sender::Ai, "first".to_string(), false),
            (Sender::Ai, "first".to_string(), false),
        ]
    );
}

#[test]
fn enter_sends_and_shift_enter_grows_input() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("line one".to_string()));
    let (state, effects) = update(state, Msg::EnterPressed { shift: true });
    assert!(effects.is_empty());
    let (state, _) = update(state, Msg::InputChanged("line one\nline two".to_string()));
    assert_eq!(state.view().input.rows, 2);

    let (state, effects) = update(state, Msg::EnterPressed { shift: false });

    assert!(matches!(
        effects.last(),
        Some(Effect::SendChat { text, .. }) if text == "line one\nline two"
    ));
    assert_eq!(state.view().input.rows, 1);
}

#[test]
fn status_request_round_trips_to_notice() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::StatusClicked);
    assert_eq!(effects, vec![Effect::CheckStatus]);

    let (_state, effects) = update(
        state,
        Msg::StatusReported {
            message: "Backend online: 3 chunks loaded".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::status("Backend online: 3 chunks loaded"))]
    );
}
