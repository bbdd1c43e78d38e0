//! Readings table with pagination footer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use time::UtcOffset;
use time::macros::format_description;

use climadash_core::DashboardView;
use climadash_types::Reading;

use super::theme::{AppTheme, BORDER_TYPE};
use crate::tui::app::App;

/// Column headings, in display order.
pub(crate) const COLUMNS: [&str; 5] = [
    "Internal temperature",
    "External temperature",
    "Internal humidity",
    "External humidity",
    "Date",
];

/// Format a timestamp as `YYYY-MM-DD HH:MM` in `offset`.
pub(crate) fn format_date(reading: &Reading, offset: UtcOffset) -> String {
    reading
        .date
        .to_offset(offset)
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| "Unknown".to_string())
}

/// Footer text, or `None` when there are no pages.
pub(crate) fn pagination_label(page: u32, total_pages: u32, total_count: u64) -> Option<String> {
    (total_pages > 0).then(|| {
        format!(
            " Page {} of {} ({} readings)  ←/→ page  Home/End jump ",
            page, total_pages, total_count
        )
    })
}

/// Draw the readings table. Only the ready state has a table; the loading
/// and error states take over the whole frame.
pub(super) fn draw_table(frame: &mut Frame, area: Rect, app: &App) {
    let DashboardView::Ready {
        readings,
        page,
        total_pages,
        refreshing,
    } = app.dashboard.view()
    else {
        return;
    };
    let theme = app.app_theme();

    let pagination = app.dashboard.pagination();
    let footer = if pagination.should_render() {
        pagination_label(page, total_pages, pagination.total_count())
    } else {
        None
    };
    let mut block = table_block(&theme, footer);
    if refreshing {
        block = block.title_top(
            Line::from(Span::styled(
                format!(" {} ", app.spinner_char()),
                Style::default().fg(theme.primary),
            ))
            .right_aligned(),
        );
    }

    if readings.is_empty() {
        let paragraph = Paragraph::new("No readings")
            .style(Style::default().fg(theme.text_muted))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let offset = app.dashboard.offset();
    let header =
        Row::new(COLUMNS.iter().map(|c| Cell::from(*c))).style(theme.table_header_style());
    let rows = readings.iter().map(|r| {
        Row::new(vec![
            Cell::from(app.format_temp(r.internal_temperature))
                .style(Style::default().fg(theme.internal)),
            Cell::from(app.format_temp(r.external_temperature))
                .style(Style::default().fg(theme.external)),
            Cell::from(format!("{:.1}%", r.internal_humidity))
                .style(Style::default().fg(theme.internal)),
            Cell::from(format!("{:.1}%", r.external_humidity))
                .style(Style::default().fg(theme.external)),
            Cell::from(format_date(r, offset)).style(Style::default().fg(theme.text_secondary)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Percentage(28),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

fn table_block(theme: &AppTheme, footer: Option<String>) -> Block<'static> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_active_style())
        .title(Span::styled(" Readings ", theme.title_style()));
    if let Some(footer) = footer {
        block = block.title_bottom(Line::from(Span::styled(
            footer,
            Style::default().fg(theme.text_muted),
        )));
    }
    block
}
