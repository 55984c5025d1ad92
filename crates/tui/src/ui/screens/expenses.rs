use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::AppState,
    state::{Entry, EntryId},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" Sort: {} ", state.sort.label()));

    let entries = state.expenses.sorted(state.sort);
    if entries.is_empty() {
        let message = if state.loading {
            "Loading..."
        } else {
            "No expenses yet. Press a to add one."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(theme.dim),
            )))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let items = entries
        .iter()
        .map(|entry| ListItem::new(entry_line(entry, state.timezone, &theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn entry_line(entry: &Entry, tz: Tz, theme: &Theme) -> Line<'static> {
    let date = format_date(entry.date, tz);
    let amount = format!("{:>10.2}", entry.amount);
    let description = if entry.description.is_empty() {
        "-".to_string()
    } else {
        entry.description.clone()
    };

    let id = match entry.id {
        EntryId::Confirmed(id) => format!("#{id}"),
        EntryId::Pending(_) => "#…".to_string(),
    };

    let mut spans = vec![
        Span::styled(format!("{id:<6}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{date:<14}"), Style::default().fg(theme.dim)),
        Span::raw(format!("{:<7}", entry.payer.as_str())),
        Span::raw(amount),
        Span::raw("  "),
        Span::raw(description),
    ];
    if entry.is_pending() {
        spans.push(Span::styled(
            "  saving…",
            Style::default().fg(theme.pending),
        ));
    }
    Line::from(spans)
}

/// Formats a stored instant as a calendar date in the display timezone.
pub fn format_date(date: DateTime<Utc>, tz: Tz) -> String {
    date.with_timezone(&tz).format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_are_shown_in_the_display_timezone() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 2, 0, 0).unwrap();
        assert_eq!(format_date(date, chrono_tz::UTC), "May 1, 2024");
        assert_eq!(
            format_date(date, chrono_tz::America::New_York),
            "Apr 30, 2024"
        );
    }
}
