use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

/// Actions the prompt can emit to the parent.
#[derive(Debug, Clone)]
pub enum PromptAction {
    Submit(String),
}

/// Question input line.
pub struct PromptComponent {
    input: String,
}

impl PromptComponent {
    pub fn new() -> Self {
        Self {
            input: String::new(),
        }
    }

    /// Replace the input wholesale, used when a suggestion is replayed.
    pub fn set_text(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<PromptAction> {
        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => {
                // blank submissions are a no-op; session enforces this too
                if self.input.trim().is_empty() {
                    None
                } else {
                    Some(PromptAction::Submit(self.input.clone()))
                }
            }
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool, busy: bool) {
        let title = if busy { " Ask (running...) " } else { " Ask " };
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let cursor = if focused { "▏" } else { "" };
        let paragraph = Paragraph::new(format!("{}{}", self.input, cursor)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border),
        );
        f.render_widget(paragraph, area);
    }
}

impl Default for PromptComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut prompt = PromptComponent::new();
        for c in "hi".chars() {
            assert!(prompt.handle_input(key(KeyCode::Char(c))).is_none());
        }
        match prompt.handle_input(key(KeyCode::Enter)) {
            Some(PromptAction::Submit(text)) => assert_eq!(text, "hi"),
            None => panic!("expected a submit action"),
        }
    }

    #[test]
    fn test_blank_submit_is_a_noop() {
        let mut prompt = PromptComponent::new();
        prompt.handle_input(key(KeyCode::Char(' ')));
        assert!(prompt.handle_input(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_backspace_edits() {
        let mut prompt = PromptComponent::new();
        prompt.set_text("abc");
        prompt.handle_input(key(KeyCode::Backspace));
        match prompt.handle_input(key(KeyCode::Enter)) {
            Some(PromptAction::Submit(text)) => assert_eq!(text, "ab"),
            None => panic!("expected a submit action"),
        }
    }
}
