//! Host surfaces the viewer writes to.
//!
//! These stand in for the page elements: the `table.main` row target, the
//! `#edit_description` modal, the page itself (reload and alerts) and the
//! `form.edit-form` values.

use reqwest::Url;

use crate::render::{self, RenderError};

/// Append-only target for rendered rows.
pub trait RowSink {
    /// Append one `<tr>` fragment after every row already present.
    fn append_row(&mut self, html: String);
}

/// The dismissible edit dialog.
pub trait Modal {
    fn hide(&mut self);
}

/// The page hosting the table and the form.
pub trait PageHost {
    /// Discard in-memory state and load the page again.
    fn reload(&mut self);

    /// Show a message the user has to acknowledge.
    fn alert(&mut self, message: &str);
}

/// In-memory `table.main`.
#[derive(Debug, Default, Clone)]
pub struct HtmlTable {
    rows: Vec<String>,
}

impl HtmlTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The table element with its header and rows, as embedded in a page.
    pub fn to_html(&self) -> Result<String, RenderError> {
        render::render_table(&self.rows)
    }
}

impl RowSink for HtmlTable {
    fn append_row(&mut self, html: String) {
        self.rows.push(html);
    }
}

/// Values of `form.edit-form` at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    /// The form's `action` attribute.
    pub action: Url,
    /// `#prj-name`
    pub name: String,
    /// `#prj-descr`
    pub description: String,
}

/// Terminal host: alerts go to stderr, hide/reload are recorded for the caller.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    pub modal_hidden: bool,
    pub reload_requested: bool,
    pub alerts: Vec<String>,
}

impl Modal for ConsoleHost {
    fn hide(&mut self) {
        tracing::debug!("edit dialog hidden");
        self.modal_hidden = true;
    }
}

impl PageHost for ConsoleHost {
    fn reload(&mut self) {
        tracing::debug!("page reload requested");
        self.reload_requested = true;
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
        self.alerts.push(message.to_string());
    }
}
