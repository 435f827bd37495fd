use chat_core::{AppViewModel, InputView, LoadControl, MessageId, MessageView, Notice, NoticeKind, Sender};
use console::style;

use super::constants::*;

/// What has already been written to the terminal.
///
/// The terminal is append-only, so only entries newer than the last one
/// shown are drawn. Removed placeholders simply stop being referenced.
#[derive(Debug, Default)]
pub(crate) struct RenderCursor {
    last_shown: Option<MessageId>,
    load_control: Option<LoadControl>,
}

pub(crate) fn banner(view: &AppViewModel, base_url: &str) -> Vec<String> {
    let mut commands = vec![CMD_SEND, CMD_STATUS, CMD_QUIT];
    if view.load_control.is_some() {
        commands.insert(1, CMD_LOAD);
    }
    vec![
        format!("{} {}", style("Chat").bold(), style(base_url).dim()),
        format!(
            "End a line with {} to continue it. Commands: {}",
            LINE_CONTINUATION,
            commands.join(", ")
        ),
    ]
}

/// Lines describing what changed since the previous frame.
pub(crate) fn render_lines(
    view: &AppViewModel,
    cursor: &mut RenderCursor,
    stamp: &str,
) -> Vec<String> {
    let mut lines = Vec::new();

    for message in view
        .messages
        .iter()
        .filter(|message| Some(message.id) > cursor.last_shown)
    {
        lines.push(format_message(message, stamp));
    }
    if let Some(anchor) = view.scroll_anchor {
        cursor.last_shown = cursor.last_shown.max(Some(anchor));
    }

    if view.load_control != cursor.load_control {
        if let Some(control) = view.load_control {
            // The initial Ready label is part of the banner.
            if cursor.load_control.is_some() || control != LoadControl::Ready {
                lines.push(format!("{} {}", style("[load]").cyan(), control.label()));
            }
        }
        cursor.load_control = view.load_control;
    }

    lines
}

pub(crate) fn prompt(input: &InputView) -> &'static str {
    if input.rows > 1 {
        PROMPT_CONTINUED
    } else {
        PROMPT
    }
}

pub(crate) fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::SendThrottled => format!("{} {}", style("[!]").yellow().bold(), notice.text),
        NoticeKind::LoadResult | NoticeKind::Status => {
            format!("{} {}", style("[i]").cyan().bold(), notice.text)
        }
    }
}

fn format_message(message: &MessageView, stamp: &str) -> String {
    let who = match message.sender {
        Sender::User => style(LABEL_USER).green().bold(),
        Sender::Ai => style(LABEL_AI).magenta().bold(),
    };
    let text = if message.loading {
        style(message.text.clone()).dim().to_string()
    } else {
        indent_continuation(&message.text)
    };
    format!("{} {} {}", style(stamp).dim(), who, text)
}

fn indent_continuation(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join("\n             ")
}
