use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use chat_core::Msg;
use chat_logging::chat_debug;

use super::constants::*;
use crate::platform::AppEvent;

/// Turns terminal lines into the keypress messages a text box would emit.
///
/// A line ending in `\` continues the input (Shift+Enter); any other line
/// submits (Enter). Slash commands are only recognised on a fresh input.
#[derive(Debug, Default)]
pub(crate) struct LineComposer {
    buffer: String,
}

impl LineComposer {
    pub(crate) fn feed(&mut self, line: &str) -> Vec<AppEvent> {
        let line = line.trim_end_matches(['\r', '\n']);

        if self.buffer.is_empty() {
            if let Some(event) = parse_command(line.trim()) {
                return vec![event];
            }
        }

        if let Some(head) = line.strip_suffix(LINE_CONTINUATION) {
            self.buffer.push_str(head);
            let events = vec![
                AppEvent::Msg(Msg::InputChanged(self.buffer.clone())),
                AppEvent::Msg(Msg::EnterPressed { shift: true }),
            ];
            self.buffer.push('\n');
            return events;
        }

        self.buffer.push_str(line);
        let text = std::mem::take(&mut self.buffer);
        vec![
            AppEvent::Msg(Msg::InputChanged(text)),
            AppEvent::Msg(Msg::EnterPressed { shift: false }),
        ]
    }
}

fn parse_command(line: &str) -> Option<AppEvent> {
    let event = match line {
        CMD_LOAD => AppEvent::Msg(Msg::LoadClicked),
        CMD_STATUS => AppEvent::Msg(Msg::StatusClicked),
        CMD_SEND => AppEvent::Msg(Msg::SendClicked),
        CMD_QUIT | CMD_EXIT => AppEvent::Quit,
        _ => return None,
    };
    Some(event)
}

/// Reads stdin on a background thread until EOF, then asks the loop to quit.
pub(crate) fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let mut composer = LineComposer::default();
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    chat_debug!("stdin closed: {}", err);
                    break;
                }
            };
            for event in composer.feed(&line) {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_submits() {
        let mut composer = LineComposer::default();
        assert_eq!(
            composer.feed("Hello\n"),
            vec![
                AppEvent::Msg(Msg::InputChanged("Hello".to_string())),
                AppEvent::Msg(Msg::EnterPressed { shift: false }),
            ]
        );
    }

    #[test]
    fn continuation_builds_multiline_input() {
        let mut composer = LineComposer::default();
        let first = composer.feed("line one\\");
        assert_eq!(
            first,
            vec![
                AppEvent::Msg(Msg::InputChanged("line one".to_string())),
                AppEvent::Msg(Msg::EnterPressed { shift: true }),
            ]
        );

        let second = composer.feed("line two");
        assert_eq!(
            second[0],
            AppEvent::Msg(Msg::InputChanged("line one\nline two".to_string()))
        );
        assert_eq!(second[1], AppEvent::Msg(Msg::EnterPressed { shift: false }));
    }

    #[test]
    fn commands_map_to_controls() {
        let mut composer = LineComposer::default();
        assert_eq!(composer.feed("/load"), vec![AppEvent::Msg(Msg::LoadClicked)]);
        assert_eq!(composer.feed(" /status "), vec![AppEvent::Msg(Msg::StatusClicked)]);
        assert_eq!(composer.feed("/send"), vec![AppEvent::Msg(Msg::SendClicked)]);
        assert_eq!(composer.feed("/quit"), vec![AppEvent::Quit]);
    }

    #[test]
    fn commands_inside_multiline_input_are_text() {
        let mut composer = LineComposer::default();
        composer.feed("see\\");
        let events = composer.feed("/load");
        assert_eq!(
            events[0],
            AppEvent::Msg(Msg::InputChanged("see\n/load".to_string()))
        );
    }
}
