//! # ComposerBox Component
//!
//! The message input under the active thread.
//!
//! ## Responsibilities
//!
//! - Capture text input (editing, cursor movement, paste)
//! - Show pending attachments as numbered chips
//! - Emit `Changed` on every edit and `Submit` on Enter
//!
//! ## State Management
//!
//! The edit buffer and cursor are internal state. The core `Composer` is the
//! source of truth: the event loop pushes it back in with [`ComposerBox::sync`]
//! after every update, which is how a successful send clears the box.
//! `Submit` is emitted even for blank text so attachment-only sends work; the
//! core decides whether anything is actually sent.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::core::composer::Composer;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders consumed vertically.
const VERTICAL_OVERHEAD: u16 = 2;
/// Border (2) + padding (2) consumed horizontally.
const HORIZONTAL_OVERHEAD: u16 = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    Changed(String),
    Submit(String),
}

pub struct ComposerBox {
    buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pos: usize,
    /// First visible char (not column) when the line is wider than the box
    scroll: usize,
    attachments: Vec<String>,
    pub focused: bool,
}

impl Default for ComposerBox {
    fn default() -> Self {
        Self::new()
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl ComposerBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            pos: 0,
            scroll: 0,
            attachments: Vec::new(),
            focused: true,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Adopt the core composer's draft and pending files.
    pub fn sync(&mut self, composer: &Composer) {
        if self.buffer != composer.text() {
            self.buffer = composer.text().to_string();
            self.pos = self.buffer.len();
            self.scroll = 0;
        }
        self.attachments = composer
            .attachments()
            .iter()
            .map(|f| f.name.clone())
            .collect();
    }

    pub fn calculate_height(&self) -> u16 {
        let chips = u16::from(!self.attachments.is_empty());
        1 + chips + VERTICAL_OVERHEAD
    }

    fn cursor_char(&self) -> usize {
        self.buffer[..self.pos].chars().count()
    }

    /// Display width of chars `from..to`.
    fn width_between(&self, from: usize, to: usize) -> usize {
        self.buffer
            .chars()
            .skip(from)
            .take(to.saturating_sub(from))
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Cursor cell relative to the first visible column.
    fn cursor_offset(&self) -> usize {
        self.width_between(self.scroll, self.cursor_char())
    }

    /// Keep the cursor cell inside `inner` columns.
    fn update_scroll(&mut self, inner: usize) {
        let cursor = self.cursor_char();
        if cursor < self.scroll {
            self.scroll = cursor;
        }
        if inner == 0 {
            return;
        }
        while self.scroll < cursor && self.cursor_offset() >= inner {
            self.scroll += 1;
        }
    }

    /// Chars from `scroll` that fit in `inner` columns.
    fn visible_text(&self, inner: usize) -> String {
        let mut used = 0;
        self.buffer
            .chars()
            .skip(self.scroll)
            .take_while(|c| {
                used += c.width().unwrap_or(0);
                used <= inner
            })
            .collect()
    }

    fn changed(&self) -> Option<ComposerEvent> {
        Some(ComposerEvent::Changed(self.buffer.clone()))
    }

    fn chips_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, name) in self.attachments.iter().enumerate() {
            spans.push(Span::styled(
                format!("[{}] {name}", i + 1),
                Style::default().fg(Color::Black).bg(Color::Gray),
            ));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl Component for ComposerBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        self.update_scroll(inner);

        let visible = self.visible_text(inner);
        let mut lines = Vec::new();
        if !self.attachments.is_empty() {
            lines.push(self.chips_line());
        }
        let text_row = lines.len() as u16;
        if self.buffer.is_empty() {
            lines.push(Line::from(Span::styled(
                "Digite uma mensagem...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        } else {
            lines.push(Line::from(visible));
        }

        let border = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(" Mensagem ")
            .title_bottom(Line::from(" Enter enviar · /attach <arquivo> · /done ").right_aligned())
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(lines).block(block), area);

        if self.focused {
            let col = u16::try_from(self.cursor_offset()).unwrap_or(u16::MAX);
            frame.set_cursor_position((area.x + 2 + col, area.y + 1 + text_row));
        }
    }
}

impl EventHandler for ComposerBox {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.pos, *c);
                self.pos += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Single-line input: fold newlines into spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.pos, &text);
                self.pos += text.len();
                self.changed()
            }
            TuiEvent::Backspace if self.pos > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                self.changed()
            }
            TuiEvent::Delete if self.pos < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(self.pos..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.pos = prev_char_boundary(&self.buffer, self.pos);
                None
            }
            TuiEvent::CursorRight => {
                if self.pos < self.buffer.len() {
                    self.pos = next_char_boundary(&self.buffer, self.pos);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.pos = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(ComposerEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
