use gacha_core::{AppViewModel, LogLevel, LogLineView, StatusTone, StatusView};
use ratatui::{
    layout::Alignment,
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;

use super::constants::*;
use super::layout;

pub fn render(f: &mut Frame, view: &AppViewModel) {
    let area = f.size();
    let status_rows = status_lines(&view.status, area.width.saturating_sub(2));
    let status_height = u16::try_from(status_rows.len() + 2).unwrap_or(u16::MAX);
    let regions = layout::split(area, status_height);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, regions.header);

    let button_style = if view.start_enabled {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };
    let button = Paragraph::new(Line::from(Span::styled(
        format!("  {}  ", view.start_label),
        button_style,
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, regions.button);

    let log_block = Block::default().borders(Borders::ALL).title(LOG_TITLE);
    let log_area = log_block.inner(regions.logs);
    let log_widget = match view.placeholder {
        Some(placeholder) => Paragraph::new(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center),
        None => {
            let lines = log_lines(&view.logs, log_area.width);
            let offset = lines.len().saturating_sub(usize::from(log_area.height));
            Paragraph::new(lines).scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
        }
    };
    f.render_widget(log_widget.block(log_block), regions.logs);

    let status = Paragraph::new(status_rows)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(STATUS_TITLE));
    f.render_widget(status, regions.status);

    let help = Paragraph::new(Line::from(Span::styled(
        HELP_TEXT,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    f.render_widget(help, regions.help);
}

/// Splits `text` into rows at most `width` columns wide. Newlines always start
/// a new row; long runs without spaces, such as links, are cut anywhere.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    for line in text.lines() {
        let mut row = String::new();
        let mut row_width = 0;
        for ch in line.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if row_width + ch_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(ch);
            row_width += ch_width;
        }
        rows.push(row);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

/// Rows for the log area at `width` columns; every row of an entry keeps the
/// entry's level style.
pub fn log_lines(logs: &[LogLineView], width: u16) -> Vec<Line<'static>> {
    logs.iter()
        .flat_map(|entry| {
            let style = level_style(entry.level);
            wrap_text(&entry.text, width)
                .into_iter()
                .map(move |row| Line::from(Span::styled(row, style)))
        })
        .collect()
}

/// Status text followed by the discovered link, wrapped to `width` columns.
pub fn status_lines(status: &StatusView, width: u16) -> Vec<Line<'static>> {
    let text_style = tone_style(status.tone);
    let url_style = Style::default().fg(Color::Cyan);
    let mut lines: Vec<Line<'static>> = wrap_text(&status.text, width)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, text_style)))
        .collect();
    if let Some(url) = &status.url {
        lines.extend(
            wrap_text(url, width)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, url_style))),
        );
    }
    lines
}

fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Success => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Warning => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default(),
    }
}

fn tone_style(tone: StatusTone) -> Style {
    match tone {
        StatusTone::Neutral => Style::default().fg(Color::Gray),
        StatusTone::Busy => Style::default().fg(Color::Blue),
        StatusTone::Success => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    }
}
