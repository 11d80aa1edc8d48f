//! Route tab bar

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs as RataTabs;
use ratatui::Frame;

use crate::core::Route;

/// Draw the tab bar at the top
pub fn draw_tab_bar(f: &mut Frame, area: Rect, active: Route) {
    let titles: Vec<Line> = Route::ALL
        .iter()
        .map(|route| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", route.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(route.title()),
            ])
        })
        .collect();

    let selected = Route::ALL.iter().position(|r| *r == active).unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, area);
}
