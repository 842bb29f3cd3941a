use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gacha_core::{AppViewModel, Msg};

/// Translates a key press into a message. The start keys do nothing while the
/// start control is disabled, which keeps at most one scan in flight.
pub fn map_key(key: KeyEvent, view: &AppViewModel) -> Option<Msg> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Msg::CloseClicked)
        }
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char(' ') => {
            view.start_enabled.then_some(Msg::ScanClicked)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(Msg::CloseClicked),
        _ => None,
    }
}
