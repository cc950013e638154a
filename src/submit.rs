//! Edit submitter: PUT the project's name and description to the form action.

use serde::Serialize;
use tracing::{info, warn};

use crate::fetch::{FetchError, Transport};
use crate::page::{EditForm, Modal, PageHost};

/// Body of the edit request. Field order is part of the wire format.
#[derive(Debug, Serialize)]
pub struct ProjectEdit<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a EditForm> for ProjectEdit<'a> {
    fn from(form: &'a EditForm) -> Self {
        Self {
            name: &form.name,
            description: &form.description,
        }
    }
}

/// JSON body with two-space indentation.
pub fn edit_body(form: &EditForm) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ProjectEdit::from(form))
}

pub fn alert_message(error: &FetchError) -> String {
    format!("something went wrong {}", error)
}

/// How a submission ended. The host never falls back to a native submit,
/// whichever variant comes back.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Dialog hidden and page reloaded.
    Saved,
    /// Alert shown; the dialog stays open for another attempt.
    Failed(String),
}

pub async fn submit_edit<T, M, P>(
    transport: &T,
    form: &EditForm,
    modal: &mut M,
    page: &mut P,
) -> SubmitOutcome
where
    T: Transport + ?Sized,
    M: Modal + ?Sized,
    P: PageHost + ?Sized,
{
    let result = match edit_body(form) {
        Ok(body) => transport.put_json(&form.action, body).await,
        Err(e) => Err(FetchError::Decode(e.to_string())),
    };

    match result {
        Ok(()) => {
            info!(action = %form.action, "project updated");
            modal.hide();
            page.reload();
            SubmitOutcome::Saved
        }
        Err(e) => {
            warn!(action = %form.action, error = %e, "project update failed");
            let message = alert_message(&e);
            page.alert(&message);
            SubmitOutcome::Failed(message)
        }
    }
}
