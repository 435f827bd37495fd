use std::io;
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use chat_core::{update, AppState, AppViewModel, Msg};
use chat_gateway::GatewayError;
use chat_logging::{chat_info, chat_warn};
use chrono::Local;

use super::config::{load_config, DeploymentConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::ui::screen::Screen;
use super::ui::{input, render};
use super::{AppError, AppEvent};

/// How long the loop waits for input before checking the gateway again.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app() -> Result<(), AppError> {
    let (mut config, config_error) = match load_config(Path::new(CONFIG_FILENAME)) {
        Ok(config) => (config, None),
        Err(err) => (DeploymentConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination);
    if let Some(err) = config_error {
        chat_warn!("{}; using default configuration", err);
    }
    chat_info!(
        "chat client starting base_url={} load_trigger={}",
        config.base_url,
        config.load_trigger
    );

    let (msg_tx, msg_rx) = mpsc::channel::<AppEvent>();
    let runner = start_runner(&mut config, msg_tx.clone())?;
    input::spawn_stdin_reader(msg_tx);

    let mut app = ChatApp::new(AppState::with_controls(config.controls()), runner);
    app.start(&config.base_url)?;
    app.run(&msg_rx)?;
    chat_info!("chat client stopped");
    Ok(())
}

/// Starts the effect runner, falling back to the default backend when the
/// configured base URL cannot be used.
fn start_runner(
    config: &mut DeploymentConfig,
    msg_tx: mpsc::Sender<AppEvent>,
) -> Result<EffectRunner, GatewayError> {
    match EffectRunner::new(config.gateway_settings(), msg_tx.clone()) {
        Err(err @ GatewayError::InvalidBaseUrl { .. }) => {
            let fallback = DeploymentConfig::default().base_url;
            chat_warn!("{}; using {} instead", err, fallback);
            config.base_url = fallback;
            EffectRunner::new(config.gateway_settings(), msg_tx)
        }
        started => started,
    }
}

struct ChatApp {
    state: AppState,
    runner: EffectRunner,
    cursor: render::RenderCursor,
    screen: Screen,
}

impl ChatApp {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            cursor: render::RenderCursor::default(),
            screen: Screen::stdout(),
        }
    }

    fn start(&mut self, base_url: &str) -> io::Result<()> {
        let view = self.state.view();
        let mut lines = render::banner(&view, base_url);
        lines.extend(self.frame_lines(&view));
        self.screen
            .write_above_prompt(&lines, render::prompt(&view.input))
    }

    fn run(&mut self, msg_rx: &mpsc::Receiver<AppEvent>) -> io::Result<()> {
        loop {
            match msg_rx.recv_timeout(POLL_INTERVAL) {
                Ok(AppEvent::Msg(msg)) => self.dispatch_msg(msg)?,
                Ok(AppEvent::Quit) | Err(RecvTimeoutError::Disconnected) => return Ok(()),
                Err(RecvTimeoutError::Timeout) => {}
            }
            while let Some(msg) = self.runner.poll_engine() {
                self.dispatch_msg(msg)?;
            }
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        let mut lines = if was_dirty {
            self.frame_lines(&view)
        } else {
            Vec::new()
        };
        let notices = self.runner.run(effects);
        lines.extend(notices.iter().map(render::render_notice));
        self.screen
            .write_above_prompt(&lines, render::prompt(&view.input))
    }

    fn frame_lines(&mut self, view: &AppViewModel) -> Vec<String> {
        let stamp = Local::now().format("%H:%M:%S").to_string();
        render::render_lines(view, &mut self.cursor, &stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn schemeless_base_url_falls_back_to_default_backend() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"(base_url: "xlintz-clint.hf.space", load_trigger: false)"#).unwrap();
        let mut config = load_config(&path).unwrap();

        let (tx, _rx) = mpsc::channel();
        assert!(matches!(
            EffectRunner::new(config.gateway_settings(), tx.clone()),
            Err(GatewayError::InvalidBaseUrl { .. })
        ));

        assert!(start_runner(&mut config, tx).is_ok());
        assert_eq!(config.base_url, chat_gateway::DEFAULT_BASE_URL);
        // Only the base URL is replaced.
        assert!(!config.load_trigger);
    }

    #[test]
    fn valid_base_url_is_kept() {
        let mut config = DeploymentConfig {
            base_url: "http://127.0.0.1:8080".to_string(),
            ..DeploymentConfig::default()
        };
        let (tx, _rx) = mpsc::channel();

        assert!(start_runner(&mut config, tx).is_ok());
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
    }
}
