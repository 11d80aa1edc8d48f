use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod tabs;

use crate::app::{App, StatusLevel};

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());
    let module = app.view().module();

    tabs::draw_tab_bar(f, areas.tabs, app.route());
    module.render(f, areas.body);
    draw_status_line(f, areas.status_line, app);
    draw_hints_line(f, areas.hints_line, module.hints());

    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Ledger ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.config().base_url())),
        Span::styled("Route ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.route().location()),
    ];
    if let Some((text, level)) = app.status_text() {
        let color = match level {
            StatusLevel::Info => Color::Green,
            StatusLevel::Warn => Color::Yellow,
            StatusLevel::Error => Color::Red,
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(text.to_string(), Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn draw_hints_line(f: &mut Frame, area: Rect, hints: &str) {
    let line = Line::from(vec![
        Span::styled(hints.to_string(), Style::default().fg(Color::DarkGray)),
        Span::styled("  ? help  q quit", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-4        Jump to route"),
        Line::from("  Tab        Next route"),
        Line::from("  Esc / Bksp Back"),
        Line::from(""),
        Line::from("Blockchain"),
        Line::from("  j / k      Move selection"),
        Line::from("  g / G      First / last block"),
        Line::from("  Enter      Show / hide transactions"),
        Line::from("  r          Refresh"),
        Line::from(""),
        Line::from("Conduct a Transaction"),
        Line::from("  Tab        Switch field"),
        Line::from("  Enter      Next field / submit"),
        Line::from("  Esc        Stop editing, e to resume"),
        Line::from(""),
        Line::from("Transaction Pool"),
        Line::from("  m          Mine transactions"),
        Line::from("  r          Refresh"),
        Line::from(""),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from(format!("Active route: {}", app.route().location())),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
