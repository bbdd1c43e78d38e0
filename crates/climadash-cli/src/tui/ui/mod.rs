//! Main UI layout and rendering for the TUI dashboard.
//!
//! Until the first page arrives the whole frame is a centered spinner, and
//! when the latest page request failed it is a centered error view.
//! Otherwise the layout consists of:
//!
//! - **Header**: Title, data source and theme indicator
//! - **Month bar**: The twelve months with the selected one highlighted
//! - **Charts**: Daily humidity and temperature averages of that month
//! - **Table**: One page of readings with a pagination footer
//! - **Status bar**: Key hints or status messages, and the clock

pub mod charts;
pub mod table;
pub mod theme;

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use time::Month;

use climadash_core::DashboardView;
use climadash_types::{month_from_index0, month_name};

use super::app::{App, Theme};
use super::errors::format_error_with_guidance;
use theme::{AppTheme, BORDER_TYPE};

/// Draw the complete TUI interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = app.app_theme();

    if matches!(app.theme, Theme::Light) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.bg)),
            frame.area(),
        );
    }

    match app.dashboard.view() {
        DashboardView::Failed(error) => draw_error_screen(frame, &theme, error),
        DashboardView::Loading => draw_loading_screen(frame, app, &theme),
        DashboardView::Ready { .. } => draw_dashboard(frame, app),
    }

    if app.show_help {
        draw_help_overlay(frame, &theme);
    }
}

fn draw_dashboard(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Header bar
            Constraint::Length(3),      // Month bar
            Constraint::Percentage(45), // Charts
            Constraint::Min(5),         // Readings table
            Constraint::Length(1),      // Status bar
        ])
        .split(frame.area());

    draw_header(frame, main_layout[0], app);
    draw_month_bar(frame, main_layout[1], app);
    charts::draw_charts(frame, main_layout[2], app);
    table::draw_table(frame, main_layout[3], app);
    draw_status_bar(frame, main_layout[4], app);
}

/// Rect of `height` rows centered vertically in `area`.
fn centered_rows(area: Rect, height: u16) -> Rect {
    Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(area)[1]
}

fn draw_loading_screen(frame: &mut Frame, app: &App, theme: &AppTheme) {
    let area = centered_rows(frame.area(), 1);
    let spinner = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} ", app.spinner_char()),
            Style::default().fg(theme.primary),
        ),
        Span::styled(
            "Loading readings...",
            Style::default().fg(theme.text_secondary),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(spinner, area);
}

/// Error view shown in place of the dashboard when the latest page request
/// failed.
fn draw_error_screen(frame: &mut Frame, theme: &AppTheme, error: &str) {
    let (message, suggestion) = format_error_with_guidance(error);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(suggestion) = suggestion {
        lines.push(Line::from(Span::styled(
            suggestion,
            Style::default().fg(theme.text_secondary),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        error.to_string(),
        Style::default().fg(theme.text_muted),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(theme.text_muted)),
        Span::styled(
            "r",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to retry or ", Style::default().fg(theme.text_muted)),
        Span::styled(
            "q",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to quit", Style::default().fg(theme.text_muted)),
    ]));

    let area = frame.area();
    let width = (area.width * 70 / 100).max(40).min(area.width);
    let height = (lines.len() as u16 + 4).min(area.height);
    let rows = centered_rows(area, height);
    let error_area = Rect::new(
        rows.x + (rows.width.saturating_sub(width)) / 2,
        rows.y,
        width,
        rows.height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(Style::default().fg(theme.danger))
        .title(Span::styled(
            " Failed to load readings ",
            Style::default().fg(theme.danger),
        ));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, error_area);
}

/// Draw the header bar with app title and indicators.
fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();

    let mut spans = vec![
        Span::styled(
            " Climate Dashboard ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION"), " "),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(
            format!(" {} ", app.source_label),
            Style::default().fg(theme.text_secondary),
        ),
    ];

    if app.dashboard.month_error().is_some() {
        spans.push(Span::styled(" CHART ERR ", Style::default().fg(theme.warning)));
    }

    spans.push(Span::styled(
        if app.fahrenheit { " °F " } else { " °C " },
        Style::default().fg(theme.info),
    ));

    if matches!(app.theme, Theme::Light) {
        spans.push(Span::styled(" LIGHT ", Style::default().fg(theme.warning)));
    } else {
        spans.push(Span::styled(" DARK ", Style::default().fg(theme.info)));
    }

    let header = Paragraph::new(Line::from(spans)).style(theme.header_style());
    frame.render_widget(header, area);
}

/// Three-letter month abbreviations for the month bar.
fn month_abbrev(month: Month) -> &'static str {
    &month_name(month)[..3]
}

/// Draw the month selector bar.
fn draw_month_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let selected = app.dashboard.month();

    let mut spans = vec![Span::raw(" ")];
    for month in (0..12).filter_map(|i| month_from_index0(i).ok()) {
        let style = if month == selected {
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.text_muted)
        };
        spans.push(Span::styled(format!(" {} ", month_abbrev(month)), style));
    }

    if app.dashboard.month_loading() {
        spans.push(Span::styled(
            format!(" {}", app.spinner_char()),
            Style::default().fg(theme.primary),
        ));
    }

    let title = format!(" {} {} ", month_name(selected), app.dashboard.year());
    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(theme.border_inactive_style())
            .title(Span::styled(title, theme.title_style())),
    );
    frame.render_widget(bar, area);
}

/// Key hints for the status bar.
fn context_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("?", "help")];

    if app.dashboard.pagination().should_render() {
        hints.push(("←/→", "page"));
    }
    hints.push(("[/]", "month"));
    hints.push(("r", "refresh"));
    hints.push(("f", "°C/°F"));
    hints.push(("q", "quit"));
    hints
}

/// Draw the status bar with context-sensitive help.
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let time_str = Local::now().format("%H:%M:%S").to_string();

    let left_spans = if let Some(msg) = app.current_status_message() {
        vec![Span::styled(
            format!(" {}", msg),
            Style::default().fg(theme.text_secondary),
        )]
    } else if app.is_loading() {
        vec![
            Span::styled(
                format!(" {} ", app.spinner_char()),
                Style::default().fg(theme.primary),
            ),
            Span::styled("Loading...", Style::default().fg(theme.text_secondary)),
        ]
    } else {
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in context_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(theme.text_muted)));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", desc),
                Style::default().fg(theme.text_muted),
            ));
        }
        spans
    };

    let status_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), status_layout[0]);

    let right = Paragraph::new(time_str)
        .style(Style::default().fg(theme.text_muted))
        .alignment(Alignment::Right);
    frame.render_widget(right, status_layout[1]);
}

/// Draw help overlay with keyboard shortcuts.
fn draw_help_overlay(frame: &mut Frame, theme: &AppTheme) {
    let area = frame.area();
    let width = (area.width * 60 / 100)
        .max(44)
        .min(area.width.saturating_sub(2));
    let height = 22.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    let help_area = Rect::new(x, y, width, height);
    frame.render_widget(Clear, help_area);

    let section = |name: &'static str| {
        Line::from(Span::styled(
            name,
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        section("--- Readings ---"),
        shortcut_line("←/h →/l", "Previous/Next page", theme),
        shortcut_line("Home/End", "First/Last page", theme),
        Line::from(""),
        section("--- Month ---"),
        shortcut_line("[ ]", "Previous/Next month", theme),
        shortcut_line("1-9", "January to September", theme),
        shortcut_line("0 - =", "October to December", theme),
        Line::from(""),
        section("--- Other ---"),
        shortcut_line("r", "Refresh", theme),
        shortcut_line("f", "Toggle °C/°F", theme),
        shortcut_line("t", "Toggle theme", theme),
        shortcut_line("?", "Toggle help", theme),
        shortcut_line("q", "Quit", theme),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(theme.text_muted),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_active_style())
        .title(Span::styled(" Keyboard Shortcuts ", theme.title_style()));

    frame.render_widget(Paragraph::new(lines).block(block), help_area);
}

/// Create a shortcut line with key and description.
fn shortcut_line<'a>(key: &str, desc: &str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>12} ", key), Style::default().fg(theme.warning)),
        Span::styled(desc.to_string(), Style::default().fg(theme.text_secondary)),
    ])
}
