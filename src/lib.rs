//! smtview -- record table viewer and project editor for Sumatra Server.
//!
//! This crate loads a project's records from its JSON endpoints, renders each
//! one as a row of the main table and submits project name/description edits.

pub mod config;
pub mod fetch;
pub mod loader;
pub mod model;
pub mod page;
pub mod render;
pub mod submit;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use reqwest::Url;

use crate::config::ViewerConfig;
use crate::fetch::{FetchError, HttpTransport, Transport};
use crate::loader::LoadSummary;
use crate::page::{EditForm, Modal, PageHost, RowSink};
use crate::submit::SubmitOutcome;

/// Page-level entry point. Created once per page; the table, dialog and page
/// targets are passed to each operation instead of being looked up globally.
#[derive(Clone)]
pub struct Viewer {
    transport: Arc<dyn Transport>,
}

impl Viewer {
    pub fn init(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Initialize over HTTP using `config`.
    pub fn from_config(config: &ViewerConfig) -> Result<Self, FetchError> {
        Ok(Self::init(Arc::new(HttpTransport::new(config)?)))
    }

    /// Fetch the project index at `index_url` and append one row per record.
    pub async fn load_records<S>(&self, index_url: &Url, table: &mut S) -> LoadSummary
    where
        S: RowSink + ?Sized,
    {
        loader::load_records(self.transport.as_ref(), index_url, table).await
    }

    /// Submit the edit form.
    pub async fn submit_edit<M, P>(&self, form: &EditForm, modal: &mut M, page: &mut P) -> SubmitOutcome
    where
        M: Modal + ?Sized,
        P: PageHost + ?Sized,
    {
        submit::submit_edit(self.transport.as_ref(), form, modal, page).await
    }

    /// Fetch the server's project list.
    pub async fn list_projects(&self, server_url: &Url) -> anyhow::Result<Vec<model::ProjectSummary>> {
        let value = self.transport.get_json(server_url).await?;
        Ok(serde_json::from_value(value)?)
    }
}
