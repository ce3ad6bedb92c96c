//! # MessageList Component
//!
//! Scrollable view of the active thread.
//!
//! ## Responsibilities
//!
//! - Display the thread's messages as bubbles
//! - Show the typing indicator under the last bubble
//! - Manage scrolling (stick-to-bottom on new content)
//! - Perform layout caching (bubble heights)
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and a borrowed `Conversation`
//! (props). `Component::render` takes `&mut self`, so the layout cache and the
//! scroll state are updated during the render pass.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation::Conversation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Bubble;
use crate::tui::event::TuiEvent;

/// Rows reserved under the last bubble while the partner is typing.
const TYPING_ROWS: u16 = 1;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Canvas height of the last frame, for the "new content" indicator
    pub content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
        }
    }

    /// Reset scroll when a different thread is opened.
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
        self.stick_to_bottom = true;
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// True when the user scrolled up and content sits below the viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom
            && self.scroll_state.offset().y + self.viewport_height < self.content_height
    }
}

/// Animated "typing" row: partner name followed by one to three dots.
pub fn typing_line(partner: &str, frame: usize) -> Line<'static> {
    let dots = ".".repeat(frame % 3 + 1);
    Line::from(vec![
        Span::styled(
            format!("{partner} está digitando"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
        Span::styled(format!("{dots:<3}"), Style::default().fg(Color::Cyan)),
    ])
}

/// Scrollable thread view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub conversation: &'a Conversation,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        conversation: &'a Conversation,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            conversation,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let messages = &self.conversation.messages;

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(&self.conversation.id, messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Bubble::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(&self.conversation.id, messages.len(), content_width);

        let messages_height: u16 = self.state.layout.heights.iter().sum();
        let typing_rows = if self.conversation.typing {
            TYPING_ROWS
        } else {
            0
        };
        let canvas_height = messages_height + typing_rows;

        // 2. Clamp scroll offset
        self.state.viewport_height = area.height;
        self.state.content_height = canvas_height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        // Pinned views are rendered at their final bottom offset
        let scroll_offset = if self.state.stick_to_bottom {
            canvas_height.saturating_sub(area.height)
        } else {
            self.state.scroll_state.offset().y
        };
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };
        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Bubble::new(&messages[i]), rect);
            y_offset += height;
        }

        if self.conversation.typing {
            let rect = Rect::new(0, messages_height, content_width, TYPING_ROWS);
            scroll_view.render_widget(
                Paragraph::new(typing_line(&self.conversation.partner, self.spinner_frame)),
                rect,
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Handled on the state because `MessageList` is rebuilt every frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights for one thread at one width.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    conversation_id: String,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            conversation_id: String::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// Number of cached heights still valid. Messages are append-only, so
    /// only a thread switch, a resize, or a shrinking list invalidates.
    pub fn reusable_count(
        &self,
        conversation_id: &str,
        message_count: usize,
        content_width: u16,
    ) -> usize {
        if self.conversation_id != conversation_id
            || self.content_width != content_width
            || message_count < self.message_count
        {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, conversation_id: &str, message_count: usize, content_width: u16) {
        if self.conversation_id != conversation_id {
            self.conversation_id = conversation_id.to_string();
        }
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
    }

    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
