use askama::Template;

use crate::controllers::FormField;
use crate::controllers::disciplines::DisciplineDetails;
use crate::ui::{Notice, Prompt, TableRow};

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListPage {
    pub title: String,
    pub notices: Vec<Notice>,
    pub new_href: String,
    pub table_id: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<TableRow>,
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormPage {
    pub title: String,
    pub notices: Vec<Notice>,
    pub action: String,
    pub cancel_href: String,
    pub fields: Vec<FormField>,
}

#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmPage {
    pub title: String,
    pub notices: Vec<Notice>,
    pub prompt: Prompt,
    pub action: String,
    pub cancel_href: String,
}

/// Shows notices briefly, then forwards the browser to `target`.
#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticePage {
    pub title: String,
    pub notices: Vec<Notice>,
    pub target: String,
}

pub struct CounterCard {
    pub id: String,
    pub label: &'static str,
    pub href: String,
    pub value: String,
    /// Comma-separated frame values, empty when shown immediately.
    pub frames: String,
    pub interval_ms: u128,
    pub delay_ms: u128,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub title: String,
    pub notices: Vec<Notice>,
    pub cards: Vec<CounterCard>,
}

#[derive(Template)]
#[template(path = "details.html")]
pub struct DetailsPage {
    pub title: String,
    pub notices: Vec<Notice>,
    pub found: bool,
    pub details: DisciplineDetails,
    pub back_href: String,
}
