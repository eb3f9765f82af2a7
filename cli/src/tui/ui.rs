use cpiledger_core::PriceComparison;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::format::{comparison_label, currency, percent};
use crate::tui::app::{App, InputMode, StatusMessage};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help
        ])
        .split(size);

    let adjuster = app.ledger.adjuster();
    let header = Paragraph::new(format!(
        "CPI LEDGER  ·  base {} (CPI {:.3})  ·  months {} to {}",
        adjuster.base_month(),
        adjuster.base_cpi(),
        app.ledger.min_month(),
        app.ledger.max_month()
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65),
            Constraint::Percentage(35),
        ])
        .split(main_chunks[1]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(9),
        ])
        .split(content_chunks[1]);

    draw_entry_table(f, app, content_chunks[0]);
    draw_detail_view(f, app, side_chunks[0]);
    draw_summary(f, app, side_chunks[1]);
    draw_input(f, app, main_chunks[2]);
    draw_status(f, app, main_chunks[3]);

    let help = match app.input_mode {
        InputMode::Normal => "a: Add | d: Delete | C: Clear all | j/k: Navigate | q: Quit",
        InputMode::Adding => "MONTH AMOUNT [PRICE] or m:/a:/p: keys | Enter: Submit | Esc: Cancel",
        InputMode::ConfirmClear => "y: Confirm | n/Esc: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[4]);

    if app.input_mode == InputMode::ConfirmClear {
        draw_confirm_clear(f, app, size);
    }
}

fn comparison_style(comparison: PriceComparison) -> Style {
    match comparison {
        PriceComparison::Under => Style::default().fg(Color::Green),
        PriceComparison::Over => Style::default().fg(Color::Red),
        PriceComparison::Even => Style::default().fg(Color::Yellow),
        PriceComparison::Undefined => Style::default().fg(Color::DarkGray),
    }
}

fn draw_entry_table(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app.entries.iter().map(|entry| {
        Row::new(vec![
            Span::styled(entry.id.to_string(), Style::default().fg(Color::DarkGray)),
            Span::raw(entry.month.to_string()),
            Span::raw(currency(entry.original_amount)),
            Span::styled(currency(entry.adjusted_amount), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(currency(entry.asking_price)),
            Span::styled(percent(entry.over_under_ratio), comparison_style(entry.comparison())),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),  // ID
            Constraint::Length(8),  // Month
            Constraint::Min(12),    // Original
            Constraint::Min(12),    // Adjusted
            Constraint::Min(12),    // Asking
            Constraint::Length(10), // Over/Under
        ]
    )
    .header(Row::new(vec!["#", "Month", "Original", "Adjusted", "Asking", "O/U"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Entries ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_detail_view(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let Some(entry) = app.selected_entry() else {
        f.render_widget(block, area);
        return;
    };

    let cpi = app.ledger.adjuster().table().get(&entry.month);
    let detail_text = vec![
        Line::from(vec![
            Span::styled("Entry #", Style::default().fg(Color::Blue)),
            Span::styled(entry.id.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Month: ", Style::default().fg(Color::Blue)),
            Span::raw(entry.month.to_string()),
        ]),
        Line::from(vec![
            Span::styled("CPI: ", Style::default().fg(Color::Blue)),
            Span::raw(cpi.map(|c| format!("{:.3}", c)).unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(vec![
            Span::styled("Sold for: ", Style::default().fg(Color::Blue)),
            Span::raw(currency(entry.original_amount)),
        ]),
        Line::from(vec![
            Span::styled("Today's dollars: ", Style::default().fg(Color::Blue)),
            Span::raw(currency(entry.adjusted_amount)),
        ]),
        Line::from(vec![
            Span::styled("Asking: ", Style::default().fg(Color::Blue)),
            Span::raw(currency(entry.asking_price)),
        ]),
        Line::from(vec![
            Span::styled("Difference: ", Style::default().fg(Color::Blue)),
            Span::styled(
                format!(
                    "{} ({} {})",
                    currency(entry.asking_difference()),
                    percent(entry.over_under_ratio.abs()),
                    comparison_label(entry.comparison())
                ),
                comparison_style(entry.comparison()),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Recorded: ", Style::default().fg(Color::DarkGray)),
            Span::raw(entry.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ]),
    ];

    let detail_block = Paragraph::new(detail_text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(detail_block, area);
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let summary = &app.summary;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Entries:  ", Style::default().fg(Color::DarkGray)),
            Span::raw(summary.entry_count.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Original: ", Style::default().fg(Color::DarkGray)),
            Span::raw(currency(summary.total_original)),
        ]),
        Line::from(vec![
            Span::styled("Adjusted: ", Style::default().fg(Color::DarkGray)),
            Span::styled(currency(summary.total_adjusted), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Average:  ", Style::default().fg(Color::DarkGray)),
            Span::raw(currency(summary.average_adjusted)),
        ]),
    ];
    if let Some(ratio) = summary.aggregate_over_under {
        lines.push(Line::from(vec![
            Span::styled("Asking:   ", Style::default().fg(Color::DarkGray)),
            Span::raw(currency(summary.total_asking)),
        ]));
        let style = if ratio >= 0.0 { Color::Green } else { Color::Red };
        lines.push(Line::from(vec![
            Span::styled("O/U:      ", Style::default().fg(Color::DarkGray)),
            Span::styled(percent(ratio), Style::default().fg(style)),
        ]));
    }

    let summary_block = Paragraph::new(lines)
        .block(Block::default().title(" Summary ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(summary_block, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let style = match app.input_mode {
        InputMode::Adding => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::DarkGray),
    };
    let input = Paragraph::new(app.input.as_str())
        .style(style)
        .block(Block::default().title(" New entry ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    if app.input_mode == InputMode::Adding {
        f.set_cursor_position(Position::new(
            area.x + app.cursor_position as u16 + 1,
            area.y + 1,
        ));
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some(StatusMessage::Info(msg)) => Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Green))),
        Some(StatusMessage::Error(msg)) => Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Red))),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_confirm_clear(f: &mut Frame, app: &App, area: Rect) {
    let [popup] = Layout::horizontal([Constraint::Length(44)]).flex(Flex::Center).areas(area);
    let [popup] = Layout::vertical([Constraint::Length(5)]).flex(Flex::Center).areas(popup);

    let text = vec![
        Line::from(format!("Delete all {} entries?", app.entries.len())),
        Line::from(""),
        Line::from(Span::styled("y: Yes    n: No", Style::default().fg(Color::DarkGray))),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Clear ledger ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}
