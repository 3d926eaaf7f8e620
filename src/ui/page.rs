use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;

use super::{CounterDisplay, Notice, Prompt, SelectState, TableRow, Ui};

/// Server-side [`Ui`]: records what controllers draw so a template can render it.
///
/// A prompt is answered by the `confirmed` flag the browser posted. Without it the prompt
/// is kept and the request renders a confirmation page instead.
#[derive(Debug, Default)]
pub struct PageUi {
    elements: HashSet<String>,
    confirmed: bool,
    rows: HashMap<String, Vec<TableRow>>,
    notices: Vec<Notice>,
    prompt: Option<Prompt>,
    redirect: Option<String>,
    field_errors: HashMap<String, String>,
    selects: HashMap<String, SelectState>,
    counters: Vec<(String, CounterDisplay)>,
    card_delays: Vec<Duration>,
}

impl PageUi {
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn confirmed(mut self, confirmed: bool) -> Self {
        self.confirmed = confirmed;
        self
    }

    pub fn rows(&self, table_id: &str) -> Option<&[TableRow]> {
        self.rows.get(table_id).map(Vec::as_slice)
    }

    pub fn take_rows(&mut self, table_id: &str) -> Vec<TableRow> {
        self.rows.remove(table_id).unwrap_or_default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn take_prompt(&mut self) -> Option<Prompt> {
        self.prompt.take()
    }

    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn take_select(&mut self, field: &str) -> Option<SelectState> {
        self.selects.remove(field)
    }

    pub fn counter(&self, key: &str) -> Option<&CounterDisplay> {
        self.counters.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    pub fn card_delays(&self) -> &[Duration] {
        &self.card_delays
    }
}

#[async_trait]
impl Ui for PageUi {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn render_rows(&mut self, table_id: &str, rows: Vec<TableRow>) {
        self.rows.insert(table_id.to_string(), rows);
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    async fn confirm(&mut self, prompt: Prompt) -> bool {
        if self.confirmed {
            return true;
        }
        self.prompt = Some(prompt);
        false
    }

    fn navigate(&mut self, href: &str) {
        self.redirect = Some(href.to_string());
    }

    fn clear_field_errors(&mut self) {
        self.field_errors.clear();
    }

    fn mark_invalid(&mut self, field: &str, message: &str) {
        self.field_errors.insert(field.to_string(), message.to_string());
    }

    fn fill_select(&mut self, field: &str, state: SelectState) {
        self.selects.insert(field.to_string(), state);
    }

    fn show_counter(&mut self, key: &str, display: CounterDisplay) {
        self.counters.retain(|(k, _)| k != key);
        self.counters.push((key.to_string(), display));
    }

    fn stagger_cards(&mut self, delays: Vec<Duration>) {
        self.card_delays = delays;
    }
}
