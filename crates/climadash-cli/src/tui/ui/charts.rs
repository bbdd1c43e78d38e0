//! Grouped bar charts of the selected month's daily averages.

use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use climadash_core::aggregate::{ChartData, humidity_chart, temperature_chart};

use super::theme::{AppTheme, BORDER_TYPE};
use crate::tui::app::App;

/// Bars hold tenths so one decimal survives the u64 conversion.
const SCALE: f64 = 10.0;

/// Bar height for a value. Negative values draw as empty bars.
pub(crate) fn bar_value(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * SCALE).round() as u64
    } else {
        0
    }
}

/// Short group label: the day of month from a `YYYY-MM-DD` key.
pub(crate) fn day_label(day: &str) -> &str {
    day.rsplit('-').next().unwrap_or(day)
}

/// Draw the humidity and temperature charts side by side.
pub(super) fn draw_charts(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let aggregates = app.dashboard.daily_aggregates();

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let humidity = humidity_chart(&aggregates);
    draw_chart(frame, layout[0], app, &theme, &humidity, "%", |v| v);

    let temperature = temperature_chart(&aggregates);
    if app.fahrenheit {
        draw_chart(frame, layout[1], app, &theme, &temperature, "°F", |c| {
            c * 9.0 / 5.0 + 32.0
        });
    } else {
        draw_chart(frame, layout[1], app, &theme, &temperature, "°C", |c| c);
    }
}

fn draw_chart(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    theme: &AppTheme,
    data: &ChartData,
    unit: &str,
    convert: impl Fn(f64) -> f64,
) {
    let title = Line::from(vec![
        Span::styled(format!(" {} ", data.title), theme.title_style()),
        Span::styled("■ ", Style::default().fg(theme.internal)),
        Span::styled("internal ", Style::default().fg(theme.text_muted)),
        Span::styled("■ ", Style::default().fg(theme.external)),
        Span::styled("external ", Style::default().fg(theme.text_muted)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_inactive_style())
        .title(title);

    if data.is_empty() {
        let text = if app.dashboard.month_loading() {
            format!("{} Loading...", app.spinner_char())
        } else if app.dashboard.month_error().is_some() {
            "Month data unavailable".to_string()
        } else {
            "No readings this month".to_string()
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(theme.text_muted))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let groups: Vec<BarGroup> = data
        .labels
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let internal = convert(data.internal.values[i]);
            let external = convert(data.external.values[i]);
            let bars = [
                Bar::default()
                    .value(bar_value(internal))
                    .text_value(format!("{:.1}{}", internal, unit))
                    .style(Style::default().fg(theme.internal)),
                Bar::default()
                    .value(bar_value(external))
                    .text_value(format!("{:.1}{}", external, unit))
                    .style(Style::default().fg(theme.external)),
            ];
            BarGroup::default()
                .label(Line::from(day_label(day).to_string()))
                .bars(&bars)
        })
        .collect();

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(3)
        .bar_gap(0)
        .group_gap(1)
        .label_style(Style::default().fg(theme.text_muted))
        .value_style(Style::default().fg(theme.text_primary));
    for group in groups {
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_value_scales_and_clamps() {
        assert_eq!(bar_value(21.46), 215);
        assert_eq!(bar_value(0.0), 0);
        assert_eq!(bar_value(-4.5), 0);
        assert_eq!(bar_value(f64::NAN), 0);
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label("2024-05-07"), "07");
        assert_eq!(day_label("odd"), "odd");
    }
}
