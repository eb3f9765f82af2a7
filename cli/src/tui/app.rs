use cpiledger_core::{parse_entry_input, Entry, InMemoryEntryRepository, LedgerService, Summary};
use ratatui::widgets::TableState;

use crate::format::currency;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Adding,
    ConfirmClear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

pub struct App {
    pub ledger: LedgerService<InMemoryEntryRepository>,
    pub entries: Vec<Entry>,
    pub summary: Summary,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(ledger: LedgerService<InMemoryEntryRepository>) -> App {
        let entries = ledger.entries();
        let summary = ledger.summarize();
        let mut state = TableState::default();
        if !entries.is_empty() {
            state.select(Some(0));
        }
        App {
            ledger,
            entries,
            summary,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn next(&mut self) {
        if self.entries.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) if i + 1 < self.entries.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.entries.is_empty() { return; }

        let i = match self.state.selected() {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn delete_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(id) = self.entries.get(i).map(|e| e.id) {
                if self.ledger.delete_entry(id) {
                    self.status = Some(StatusMessage::Info(format!("Deleted entry #{}", id)));
                }
            }
            self.reload();

            // Adjust selection after reload
            if self.entries.is_empty() {
                self.state.select(None);
            } else if i >= self.entries.len() {
                self.state.select(Some(self.entries.len() - 1));
            } else {
                self.state.select(Some(i));
            }
        }
    }

    pub fn request_clear(&mut self) {
        if !self.entries.is_empty() {
            self.input_mode = InputMode::ConfirmClear;
        }
    }

    pub fn confirm_clear(&mut self) {
        self.ledger.clear_all();
        self.reload();
        self.state.select(None);
        self.input_mode = InputMode::Normal;
        self.status = Some(StatusMessage::Info("Cleared all entries".to_string()));
    }

    fn reload(&mut self) {
        self.entries = self.ledger.entries();
        self.summary = self.ledger.summarize();
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Adds the typed entry. On a rejected entry the input stays so it can be corrected.
    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        let result = parse_entry_input(&args)
            .and_then(|input| self.ledger.add_entry(&input.month, input.original_amount, input.asking_price));

        match result {
            Ok(entry) => {
                self.reload();
                let index = self.entries.iter().position(|e| e.id == entry.id);
                self.state.select(index);
                self.status = Some(StatusMessage::Info(format!(
                    "Added #{}: {} in {} is {} today",
                    entry.id,
                    currency(entry.original_amount),
                    entry.month,
                    currency(entry.adjusted_amount)
                )));
                self.input.clear();
                self.cursor_position = 0;
                self.exit_input_mode();
            }
            Err(e) => {
                self.status = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpiledger_core::{CpiTable, LedgerConfig};

    fn app() -> App {
        let table = CpiTable::from_pairs([("2020-01", 258.8), ("2010-01", 216.687), ("2025-09", 320.0)]).unwrap();
        App::new(LedgerService::in_memory(table, &LedgerConfig::default()).unwrap())
    }

    fn type_and_submit(app: &mut App, text: &str) {
        app.enter_add_mode();
        for c in text.chars() {
            app.input_char(c);
        }
        app.submit_command();
    }

    #[test]
    fn test_add_selects_new_entry() {
        let mut app = app();
        type_and_submit(&mut app, "2010-01 100 120");
        type_and_submit(&mut app, "2020-01 100 130");

        assert_eq!(app.entries.len(), 2);
        assert_eq!(app.input_mode, InputMode::Normal);
        // 2020-01 sorts first
        assert_eq!(app.selected_entry().map(|e| e.id), Some(2));
        assert_eq!(app.summary.entry_count, 2);
        assert!(matches!(app.status, Some(StatusMessage::Info(_))));
    }

    #[test]
    fn test_rejected_input_keeps_form_open() {
        let mut app = app();
        type_and_submit(&mut app, "1900-01 50");
        assert_eq!(app.input_mode, InputMode::Adding);
        assert_eq!(app.input, "1900-01 50");
        assert!(matches!(app.status, Some(StatusMessage::Error(_))));
        assert!(app.entries.is_empty());
    }

    #[test]
    fn test_delete_and_navigation() {
        let mut app = app();
        type_and_submit(&mut app, "2010-01 100");
        type_and_submit(&mut app, "2020-01 100");
        type_and_submit(&mut app, "2025-09 100");

        app.state.select(Some(2));
        app.next();
        assert_eq!(app.state.selected(), Some(0));
        app.previous();
        assert_eq!(app.state.selected(), Some(2));

        app.delete_selected();
        assert_eq!(app.entries.len(), 2);
        assert_eq!(app.state.selected(), Some(1));
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut app = app();
        type_and_submit(&mut app, "2020-01 100");

        app.request_clear();
        assert_eq!(app.input_mode, InputMode::ConfirmClear);
        app.exit_input_mode();
        assert_eq!(app.entries.len(), 1);

        app.request_clear();
        app.confirm_clear();
        assert!(app.entries.is_empty());
        assert_eq!(app.summary.entry_count, 0);
        assert_eq!(app.state.selected(), None);

        type_and_submit(&mut app, "2020-01 100");
        assert_eq!(app.entries[0].id, 1);
    }

    #[test]
    fn test_cursor_editing() {
        let mut app = app();
        app.enter_add_mode();
        for c in "2020-1".chars() {
            app.input_char(c);
        }
        app.move_cursor_left();
        app.input_char('0');
        assert_eq!(app.input, "2020-01");
        app.move_cursor_right();
        app.delete_char();
        assert_eq!(app.input, "2020-0");
    }
}
