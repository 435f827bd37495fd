use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chat_core::{Effect, MessageId, Msg, Notice, TimerId};
use chat_gateway::{EngineEvent, EngineHandle, GatewayError, GatewayResult, GatewaySettings};
use chat_logging::{chat_info, chat_warn};

use super::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(settings: GatewaySettings, msg_tx: mpsc::Sender<AppEvent>) -> Result<Self, GatewayError> {
        let engine = EngineHandle::new(settings)?;
        Ok(Self { engine, msg_tx })
    }

    /// Runs effects and returns the notices the caller should show.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Notice> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::SendChat { placeholder, text } => {
                    chat_info!("SendChat placeholder={} text_len={}", placeholder, text.len());
                    self.engine.send_chat(placeholder.get(), text);
                }
                Effect::ArmCooldown { timer, delay } => {
                    arm_cooldown(timer, delay, self.msg_tx.clone());
                }
                Effect::TriggerLoad => {
                    chat_info!("TriggerLoad");
                    self.engine.trigger_load();
                }
                Effect::CheckStatus => {
                    self.engine.check_health();
                }
                Effect::Notify(notice) => {
                    // A terminal notice needs no dismissal. The ack is queued, so
                    // the core sees it only after the notice has been drawn.
                    let _ = self
                        .msg_tx
                        .send(AppEvent::Msg(Msg::NoticeAcknowledged(notice.kind)));
                    notices.push(notice);
                }
            }
        }
        notices
    }

    /// Next gateway result, translated for the core.
    pub fn poll_engine(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_engine_event)
    }
}

/// Fire-and-forget timer: nothing cancels it and nothing cleans up after it.
pub(crate) fn arm_cooldown(timer: TimerId, delay: Duration, msg_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = msg_tx.send(AppEvent::Msg(Msg::CooldownElapsed { timer }));
    });
}

fn map_engine_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ChatCompleted { request_id, result } => {
            log_failure("ask", request_id, &result);
            Msg::ChatReplied {
                placeholder: MessageId::new(request_id),
                reply: result.text(),
            }
        }
        EngineEvent::LoadCompleted { result } => {
            log_failure("load", 0, &result);
            Msg::LoadFinished {
                message: result.text(),
            }
        }
        EngineEvent::HealthChecked { result } => {
            log_failure("status", 0, &result);
            Msg::StatusReported {
                message: result.text(),
            }
        }
    }
}

fn log_failure(operation: &str, request_id: u64, result: &GatewayResult) {
    if let Some(kind) = result.failure() {
        chat_warn!("{} request {} failed: {}", operation, request_id, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::NoticeKind;
    use chat_gateway::FailureKind;

    #[test]
    fn cooldown_timer_fires_once() {
        let (tx, rx) = mpsc::channel();
        arm_cooldown(TimerId::new(3), Duration::from_millis(10), tx);

        let event = rx.recv_timeout(Duration::from_secs(2)).expect("timer fired");
        assert_eq!(
            event,
            AppEvent::Msg(Msg::CooldownElapsed {
                timer: TimerId::new(3)
            })
        );
        // The sender is dropped after firing.
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn failed_chat_becomes_ordinary_reply() {
        let msg = map_engine_event(EngineEvent::ChatCompleted {
            request_id: 5,
            result: GatewayResult::Failed {
                kind: FailureKind::Unreachable,
                message: chat_gateway::WAKING_UP_REPLY.to_string(),
            },
        });
        assert_eq!(
            msg,
            Msg::ChatReplied {
                placeholder: MessageId::new(5),
                reply: chat_gateway::WAKING_UP_REPLY.to_string(),
            }
        );
    }

    #[test]
    fn load_result_carries_backend_message() {
        let msg = map_engine_event(EngineEvent::LoadCompleted {
            result: GatewayResult::Loaded {
                message: "Loaded 42 records".to_string(),
            },
        });
        assert_eq!(
            msg,
            Msg::LoadFinished {
                message: "Loaded 42 records".to_string()
            }
        );
    }

    #[test]
    fn notice_is_returned_and_acknowledged() {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(GatewaySettings::default(), tx).unwrap();

        let notices = runner.run(vec![Effect::Notify(Notice::load_result("Loaded 42 records"))]);
        assert_eq!(notices, vec![Notice::load_result("Loaded 42 records")]);

        let event = rx.recv_timeout(Duration::from_secs(2)).expect("ack queued");
        assert_eq!(
            event,
            AppEvent::Msg(Msg::NoticeAcknowledged(NoticeKind::LoadResult))
        );
    }

    #[test]
    fn effects_without_notices_return_nothing() {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(GatewaySettings::default(), tx).unwrap();

        let notices = runner.run(vec![Effect::ArmCooldown {
            timer: TimerId::new(1),
            delay: Duration::from_millis(5),
        }]);
        assert!(notices.is_empty());
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(2)).expect("timer fired"),
            AppEvent::Msg(Msg::CooldownElapsed {
                timer: TimerId::new(1)
            })
        );
    }
}
