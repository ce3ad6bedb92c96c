//! # Core Application Logic
//!
//! This module contains SkillSwap's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Schedule
//!                    ┌───────────▼─────────────┐
//!                    │       Scheduler         │
//!                    │  (tokio timers, cancel) │
//!                    └───────────┬─────────────┘
//!                                │ Action
//!                         ┌──────▼──────┐
//!                         │    TUI      │
//!                         │  Adapter    │
//!                         │ (ratatui)   │
//!                         └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`, everything that can happen
//! - [`conversation`]: Threads, messages and the store that owns them
//! - [`composer`]: Draft text and pending attachments
//! - [`scheduler`]: Deferred actions with cancellation
//! - [`forms`], [`matches`], [`network`], [`reviews`], [`history`],
//!   [`achievements`]: the other pages' state

pub mod achievements;
pub mod action;
pub mod composer;
pub mod config;
pub mod conversation;
pub mod forms;
pub mod history;
pub mod matches;
pub mod network;
pub mod reviews;
pub mod scheduler;
pub mod seed;
pub mod state;
