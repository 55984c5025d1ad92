use ratatui::{style::Style, text::Span};

use crate::{app::Mode, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn for_mode(mode: Mode) -> Vec<KeyHint> {
    match mode {
        Mode::List => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("a", "add"),
            KeyHint::new("s", "sort"),
            KeyHint::new("r", "refresh"),
            KeyHint::new("R", "reset"),
            KeyHint::new("q", "quit"),
        ],
        Mode::Add => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("←→", "payer"),
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "cancel"),
        ],
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}
