use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub button: Rect,
    pub logs: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Stacks header, start button, log area, status box and key help from top to
/// bottom.
///
/// The status box asks for `status_height` rows; it grows past its minimum
/// only while the log area keeps `LOG_MIN_HEIGHT`. The log area takes
/// whatever height is left.
pub fn split(area: Rect, status_height: u16) -> Regions {
    let fixed = HEADER_HEIGHT + BUTTON_HEIGHT + LOG_MIN_HEIGHT + HELP_HEIGHT;
    let status_max = area.height.saturating_sub(fixed).max(STATUS_MIN_HEIGHT);
    let status_height = status_height.clamp(STATUS_MIN_HEIGHT, status_max);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Min(LOG_MIN_HEIGHT),
                Constraint::Length(status_height),
                Constraint::Length(HELP_HEIGHT),
            ]
            .as_ref(),
        )
        .split(area);

    Regions {
        header: rows[0],
        button: rows[1],
        logs: rows[2],
        status: rows[3],
        help: rows[4],
    }
}
