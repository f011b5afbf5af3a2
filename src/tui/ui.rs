use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Sparkline},
    Frame,
};

use super::theme::CatppuccinTheme as Theme;
use super::Dashboard;
use crate::engine::InterfaceView;
use crate::format::{format_bytes, format_rate, per_second};

const PANEL_HEIGHT: u16 = 9;

pub fn draw(f: &mut Frame, dashboard: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(PANEL_HEIGHT),
            Constraint::Length(3),  // Footer
        ])
        .split(f.area());

    draw_header(f, chunks[0], dashboard);
    draw_interfaces(f, chunks[1], dashboard);
    draw_footer(f, chunks[2], dashboard);
}

fn draw_header(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let title = Line::from(vec![
        Span::styled("◆ ", Style::default().fg(Theme::MAUVE)),
        Span::styled("NetWatch", Style::default()
            .fg(Theme::LAVENDER)
            .add_modifier(Modifier::BOLD)),
        Span::styled(" ◆  ", Style::default().fg(Theme::MAUVE)),
        Span::styled(format!("Monitoring {} interface(s)", dashboard.monitored_count()), Style::default()
            .fg(Theme::SUBTEXT0)
            .add_modifier(Modifier::ITALIC)),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::MAUVE))
            .style(Style::default().bg(Theme::MANTLE)));

    f.render_widget(header, area);
}

fn draw_interfaces(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    if dashboard.views.is_empty() {
        let waiting = Paragraph::new("Gathering interface data...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Theme::SUBTEXT0).bg(Theme::MANTLE));
        f.render_widget(waiting, area);
        return;
    }

    let fits = usize::from((area.height / PANEL_HEIGHT).max(1));
    let visible: Vec<&InterfaceView> = dashboard.views.iter()
        .skip(dashboard.selected)
        .take(fits)
        .collect();

    let constraints: Vec<Constraint> = visible.iter()
        .map(|_| Constraint::Length(PANEL_HEIGHT))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (view, row) in visible.into_iter().zip(rows.iter()) {
        draw_interface_panel(f, *row, view, dashboard.interval);
    }
}

fn draw_interface_panel(f: &mut Frame, area: Rect, view: &InterfaceView, interval: std::time::Duration) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", view.name), Style::default()
            .fg(Theme::BLUE)
            .add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Theme::BLUE))
        .style(Style::default().bg(Theme::MANTLE));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(inner);

    let stats = vec![
        Line::from(vec![
            Span::styled("↑ Sent ", Style::default().fg(Theme::sent_color()).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{} {}", format_rate(per_second(view.current_sent_rate, interval)), view.sent_trend.arrow()),
                Style::default().fg(Theme::TEXT)),
            Span::raw("   "),
            Span::styled("↓ Recv ", Style::default().fg(Theme::recv_color()).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{} {}", format_rate(per_second(view.current_recv_rate, interval)), view.recv_trend.arrow()),
                Style::default().fg(Theme::TEXT)),
        ]),
        Line::from(vec![
            Span::styled(format!("Total sent {}   Total recv {}",
                format_bytes(view.total_sent as f64),
                format_bytes(view.total_recv as f64)),
                Style::default().fg(Theme::SUBTEXT0)),
        ]),
    ];
    f.render_widget(Paragraph::new(stats), chunks[0]);

    let graphs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let sent = sparkline_data(&view.sent_history);
    let recv = sparkline_data(&view.recv_history);

    f.render_widget(sparkline("Sent", &sent, Theme::sent_color()), graphs[0]);
    f.render_widget(sparkline("Received", &recv, Theme::recv_color()), graphs[1]);
}

fn sparkline<'a>(title: &'a str, data: &'a [u64], color: ratatui::style::Color) -> Sparkline<'a> {
    Sparkline::default()
        .block(Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::SURFACE0)))
        .data(data)
        .style(Style::default().fg(color))
}

/// Sparklines cannot draw below zero; counter resets show as empty bars.
pub fn sparkline_data(series: &[i64]) -> Vec<u64> {
    series.iter().map(|v| (*v).max(0) as u64).collect()
}

fn draw_footer(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let status_text = if dashboard.paused {
        Span::styled(" ⏸ PAUSED ", Style::default()
            .fg(Theme::CRUST)
            .bg(Theme::YELLOW)
            .add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" ▶ RUNNING ", Style::default()
            .fg(Theme::CRUST)
            .bg(Theme::GREEN)
            .add_modifier(Modifier::BOLD))
    };

    let footer_text = Line::from(vec![
        Span::raw("  "),
        Span::styled("[q]", Style::default().fg(Theme::MAUVE).add_modifier(Modifier::BOLD)),
        Span::styled(" Quit", Style::default().fg(Theme::TEXT)),
        Span::raw("  │  "),
        Span::styled("[p]", Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD)),
        Span::styled(" Pause", Style::default().fg(Theme::TEXT)),
        Span::raw("  │  "),
        Span::styled("[↑↓]", Style::default().fg(Theme::LAVENDER).add_modifier(Modifier::BOLD)),
        Span::styled(" Scroll", Style::default().fg(Theme::TEXT)),
        Span::raw("  │  "),
        status_text,
    ]);

    let footer = Paragraph::new(footer_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::SURFACE0))
            .style(Style::default().bg(Theme::MANTLE)));

    f.render_widget(footer, area);
}
