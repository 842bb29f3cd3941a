use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gacha_core::{update, AppState, AppViewModel, Msg, ScanState};
use gacha_engine::{EngineHandle, EventHub, GameLogScanner};
use ratatui::{backend::CrosstermBackend, Terminal};
use scan_logging::{scan_error, scan_info};

use super::config;
use super::effects::{EffectRunner, WindowControl};
use super::logging;
use super::subscriber::LogStreamSubscriber;
use super::ui;

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

pub fn run_app() -> Result<()> {
    logging::initialize();

    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let settings = config::load_settings(&work_dir);

    let hub = EventHub::new();
    let engine = EngineHandle::new(Arc::new(GameLogScanner::new(settings)), hub.clone());
    let window = WindowControl::default();
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let effects = EffectRunner::new(engine, window.clone(), msg_tx.clone());

    let mut subscriber = LogStreamSubscriber::mount(&hub, msg_tx.clone());
    let mut scan_window = ScanWindow::new(msg_rx, msg_tx, effects, window);

    let result = enter_terminal().and_then(|mut terminal| {
        let outcome = scan_window.run(&mut terminal);
        let restored = leave_terminal(&mut terminal);
        outcome.and(restored)
    });

    subscriber.unmount();
    if let Err(err) = &result {
        scan_error!("Gacha helper exited with error: {:#}", err);
    } else {
        scan_info!("Gacha helper closed");
    }
    // Only after the terminal is restored.
    if let Some(url) = scan_window.found_url() {
        println!("{url}");
    }
    result
}

fn enter_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err).context("enter alternate screen");
    }
    Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")
}

fn leave_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

/// Owns the controller state and drives it from keys and background messages.
struct ScanWindow {
    state: AppState,
    view: AppViewModel,
    msg_rx: mpsc::Receiver<Msg>,
    msg_tx: mpsc::Sender<Msg>,
    effects: EffectRunner,
    window: WindowControl,
    needs_redraw: bool,
}

impl ScanWindow {
    fn new(
        msg_rx: mpsc::Receiver<Msg>,
        msg_tx: mpsc::Sender<Msg>,
        effects: EffectRunner,
        window: WindowControl,
    ) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            msg_rx,
            msg_tx,
            effects,
            window,
            needs_redraw: true,
        }
    }

    fn run(&mut self, terminal: &mut AppTerminal) -> Result<()> {
        while !self.window.is_closed() {
            self.process_pending_messages();
            if std::mem::take(&mut self.needs_redraw) {
                let view = &self.view;
                terminal.draw(|f| ui::render::render(f, view))?;
            }

            if event::poll(ui::constants::POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(msg) = ui::input::map_key(key, &self.view) {
                            let _ = self.msg_tx.send(msg);
                        }
                    }
                    Event::Resize(_, _) => self.needs_redraw = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// The link of the last scan, if it succeeded.
    fn found_url(&self) -> Option<&str> {
        match self.state.scan_state() {
            ScanState::Succeeded { url } => Some(url.as_str()),
            _ => None,
        }
    }

    fn process_pending_messages(&mut self) {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
            self.needs_redraw = true;
        }
        self.state = state;
        self.effects.enqueue(effects);
    }
}
