//! The surface controllers draw on: the page a browser would show.
//!
//! Controllers never touch markup directly. They address elements by id through [`Ui`],
//! and every implementation decides how a row, a prompt or a notice is presented.

pub mod page;

use std::time::Duration;

use async_trait::async_trait;

pub use page::PageUi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Question,
}

impl Tone {
    pub fn css(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Error => "danger",
            Tone::Warning => "warning",
            Tone::Question => "info",
        }
    }
}

/// A modal or toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub title: String,
    pub text: String,
    pub toast: bool,
}

impl Notice {
    pub fn new(tone: Tone, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tone,
            title: title.into(),
            text: text.into(),
            toast: false,
        }
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Tone::Success, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Tone::Error, title, text)
    }

    pub fn warning(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Tone::Warning, title, text)
    }

    pub fn toast(mut self) -> Self {
        self.toast = true;
        self
    }

    pub fn css(&self) -> &'static str {
        self.tone.css()
    }
}

/// Affirm/cancel question asked before a state-changing action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub tone: Tone,
    pub title: String,
    pub text: String,
    pub confirm_label: String,
}

impl Prompt {
    pub fn new(
        tone: Tone,
        title: impl Into<String>,
        text: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        Self {
            tone,
            title: title.into(),
            text: text.into(),
            confirm_label: confirm_label.into(),
        }
    }

    pub fn css(&self) -> &'static str {
        match self.tone {
            Tone::Success | Tone::Question => "success",
            _ => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub class: String,
    /// Badge classes; empty renders plain text.
    pub badge: String,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: String::new(),
            badge: String::new(),
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::plain(text).with_class("fw-bold")
    }

    pub fn badge(badge: &str, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: String::new(),
            badge: badge.to_string(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        if !self.class.is_empty() {
            self.class.push(' ');
        }
        self.class.push_str(class);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    Deactivate,
    Reactivate,
}

/// Control rendered in a row's action column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub kind: ActionKind,
    pub title: String,
    pub href: String,
    pub style: String,
    pub icon: String,
    /// Posts to `href` instead of following it.
    pub post: bool,
}

impl RowAction {
    fn build(kind: ActionKind, title: &str, href: String, style: &str, icon: &str, post: bool) -> Self {
        Self {
            kind,
            title: title.to_string(),
            href,
            style: style.to_string(),
            icon: icon.to_string(),
            post,
        }
    }

    pub fn view(href: String) -> Self {
        Self::build(ActionKind::View, "View", href, "btn-info text-white", "bi-eye-fill", false)
    }

    pub fn edit(href: String) -> Self {
        Self::build(ActionKind::Edit, "Edit", href, "btn-warning", "bi-pencil-fill", false)
    }

    pub fn delete(href: String) -> Self {
        Self::build(ActionKind::Delete, "Delete", href, "btn-danger", "bi-trash-fill", true)
    }

    pub fn deactivate(href: String) -> Self {
        Self::build(ActionKind::Deactivate, "Deactivate", href, "btn-danger", "bi-trash-fill", true)
    }

    pub fn reactivate(href: String) -> Self {
        Self::build(
            ActionKind::Reactivate,
            "Reactivate",
            href,
            "btn-success",
            "bi-arrow-counterclockwise",
            true,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    pub cells: Vec<Cell>,
    pub actions: Vec<RowAction>,
    pub muted: bool,
    /// Non-zero for a single placeholder cell spanning this many columns.
    pub colspan: usize,
    pub error: bool,
}

impl TableRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            ..Self::default()
        }
    }

    pub fn with_actions(mut self, actions: Vec<RowAction>) -> Self {
        self.actions = actions;
        self
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn placeholder(colspan: usize, text: impl Into<String>) -> Self {
        Self {
            cells: vec![Cell::plain(text)],
            colspan,
            ..Self::default()
        }
    }

    pub fn error_placeholder(colspan: usize, text: impl Into<String>) -> Self {
        Self {
            error: true,
            ..Self::placeholder(colspan, text)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.colspan > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectState {
    Loaded {
        placeholder: String,
        options: Vec<SelectOption>,
    },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterDisplay {
    Immediate(u64),
    Animated {
        target: u64,
        interval: Duration,
        frames: Vec<u64>,
    },
}

impl CounterDisplay {
    pub fn final_value(&self) -> u64 {
        match self {
            CounterDisplay::Immediate(value) => *value,
            CounterDisplay::Animated { target, .. } => *target,
        }
    }
}

#[async_trait]
pub trait Ui: Send {
    /// Whether the page carries the element with this id.
    fn has_element(&self, id: &str) -> bool;

    /// Replace the body of the table `table_id`.
    fn render_rows(&mut self, table_id: &str, rows: Vec<TableRow>);

    fn notify(&mut self, notice: Notice);

    /// Resolves `true` only when the user affirms.
    async fn confirm(&mut self, prompt: Prompt) -> bool;

    fn navigate(&mut self, href: &str);

    fn clear_field_errors(&mut self);

    fn mark_invalid(&mut self, field: &str, message: &str);

    fn fill_select(&mut self, field: &str, state: SelectState);

    fn show_counter(&mut self, key: &str, display: CounterDisplay);

    fn stagger_cards(&mut self, delays: Vec<Duration>);
}
