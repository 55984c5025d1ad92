use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AddForm, AppState, FormField},
    ui::theme::Theme,
};

fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.form;
    let card_area = centered_box(48.min(area.width), 7, area);

    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" add expense ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let payer = form.payer.as_str().to_string();
    let lines = vec![
        field_line(
            "Description",
            &form.description,
            field_style(form, FormField::Description, &theme),
        ),
        field_line("Payer", &payer, field_style(form, FormField::Payer, &theme)),
        field_line(
            "Amount",
            &form.amount,
            field_style(form, FormField::Amount, &theme),
        ),
        Line::from(""),
        match &form.message {
            Some(message) => Line::from(Span::styled(
                message.clone(),
                Style::default().fg(theme.error),
            )),
            None => Line::from(""),
        },
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_style(form: &AddForm, field: FormField, theme: &Theme) -> Style {
    if form.focus == field {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    }
}

fn field_line(label: &'static str, value: &str, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), style),
        Span::raw(value.to_string()),
    ])
}
