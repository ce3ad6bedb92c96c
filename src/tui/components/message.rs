use chrono::{DateTime, Local, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::conversation::{Attachment, AttachmentKind, DeliveryStatus, Message};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never take more than this share of the row.
const MAX_WIDTH_PERCENT: u16 = 75;

/// Accent used for "read" receipts.
pub const ACCENT: Color = Color::Cyan;

/// Local `HH:MM`.
pub fn format_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}

/// Receipt glyph for self-authored messages.
pub fn status_glyph(status: DeliveryStatus) -> Span<'static> {
    match status {
        DeliveryStatus::Sent => Span::raw("✓"),
        DeliveryStatus::Delivered => Span::raw("✓✓"),
        DeliveryStatus::Read => Span::styled("✓✓", Style::default().fg(ACCENT)),
    }
}

pub fn attachment_label(attachment: &Attachment) -> String {
    match attachment.kind {
        AttachmentKind::Image => match &attachment.name {
            Some(name) => format!("[imagem: {name}]"),
            None => "[imagem]".to_string(),
        },
        AttachmentKind::Document => format!(
            "[PDF {}]",
            attachment.name.as_deref().unwrap_or("Documento PDF")
        ),
        AttachmentKind::Audio => match attachment.duration_secs {
            Some(secs) => format!("[áudio {}:{:02}]", secs / 60, secs % 60),
            None => "[áudio]".to_string(),
        },
    }
}

/// A single chat bubble. Self messages hug the right edge, partner messages the left.
///
/// Transient: built each frame from a borrowed `Message`. Text is wrapped here
/// (not by `Paragraph`) so [`Bubble::calculate_height`] always agrees with what
/// gets drawn.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub message: &'a Message,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    fn footer_width(message: &Message) -> usize {
        // "HH:MM" plus " ✓✓" on own messages
        let receipt = if message.is_mine() { 3 } else { 0 };
        5 + receipt
    }

    /// Inner text width available for a row `row_width` wide.
    fn max_inner_width(row_width: u16) -> u16 {
        (row_width.saturating_mul(MAX_WIDTH_PERCENT) / 100).saturating_sub(HORIZONTAL_OVERHEAD)
    }

    fn wrapped_text(message: &Message, inner: u16) -> Vec<String> {
        if message.text.is_empty() || inner == 0 {
            return Vec::new();
        }
        let options = textwrap::Options::new(inner as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        textwrap::wrap(&message.text, options)
            .into_iter()
            .map(|l| l.into_owned())
            .collect()
    }

    fn content_lines(message: &Message, inner: u16) -> Vec<String> {
        let mut lines: Vec<String> = message.attachments.iter().map(attachment_label).collect();
        lines.extend(Self::wrapped_text(message, inner));
        lines
    }

    /// Outer width of the bubble within a row `row_width` wide.
    pub fn calculate_width(message: &Message, row_width: u16) -> u16 {
        let inner = Self::max_inner_width(row_width);
        let widest = Self::content_lines(message, inner)
            .iter()
            .map(|l| l.width())
            .chain(std::iter::once(Self::footer_width(message)))
            .max()
            .unwrap_or(0);
        let inner_used = (widest as u16).min(inner.max(1));
        (inner_used + HORIZONTAL_OVERHEAD).min(row_width)
    }

    /// Outer height, borders included.
    pub fn calculate_height(message: &Message, row_width: u16) -> u16 {
        let inner = Self::max_inner_width(row_width);
        if inner == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        let content = Self::content_lines(message, inner).len() as u16;
        content + 1 + VERTICAL_OVERHEAD
    }
}

impl Widget for Bubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let msg = self.message;
        let width = Self::calculate_width(msg, area.width);
        let x = if msg.is_mine() {
            area.x + area.width.saturating_sub(width)
        } else {
            area.x
        };
        let rect = Rect::new(x, area.y, width, area.height);

        let (style, border_style) = if msg.is_mine() {
            (
                Style::default().fg(Color::White),
                Style::default().fg(Color::Blue),
            )
        } else {
            (
                Style::default().fg(Color::Gray),
                Style::default().fg(Color::DarkGray),
            )
        };

        let inner = Self::max_inner_width(area.width);
        let mut lines: Vec<Line> = msg
            .attachments
            .iter()
            .map(|a| {
                Line::from(Span::styled(
                    attachment_label(a),
                    Style::default().add_modifier(Modifier::ITALIC),
                ))
            })
            .collect();
        lines.extend(Self::wrapped_text(msg, inner).into_iter().map(Line::from));

        let mut footer = vec![Span::styled(
            format_time(msg.timestamp),
            Style::default().add_modifier(Modifier::DIM),
        )];
        if msg.is_mine() {
            footer.push(Span::raw(" "));
            footer.push(status_glyph(msg.status()));
        }
        lines.push(Line::from(footer).right_aligned());

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner_area = block.inner(rect);
        block.render(rect, buf);
        Paragraph::new(lines).style(style).render(inner_area, buf);
    }
}
