//! Record loader: project index first, then every record independently.
//!
//! Record fetches all run at once and rows are appended in completion order.
//! A failed or malformed record only loses its own row.

use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::fetch::{self, FetchError, Transport};
use crate::model::{ModelError, ProjectData, Record};
use crate::page::RowSink;
use crate::render::{self, RenderError};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Outcome of one load pass.
#[derive(Debug, Default, Clone)]
pub struct LoadSummary {
    /// Project index, when it could be fetched and understood.
    pub project: Option<ProjectData>,
    /// Record URLs listed by the index.
    pub requested: usize,
    /// Rows appended to the table.
    pub rendered: usize,
    /// Records that produced no row.
    pub skipped: usize,
}

/// Narrow the index to records carrying `tag`, as the tag badges do.
pub fn with_tag_filter(index_url: &Url, tag: &str) -> Url {
    let mut url = index_url.clone();
    url.query_pairs_mut().append_pair("tags", tag);
    url
}

pub async fn load_records<T, S>(transport: &T, index_url: &Url, table: &mut S) -> LoadSummary
where
    T: Transport + ?Sized,
    S: RowSink + ?Sized,
{
    let mut summary = LoadSummary::default();

    let project = match fetch_index(transport, index_url).await {
        Ok(project) => project,
        Err(e) => {
            warn!(url = %index_url, error = %e, "project index unavailable, no records rendered");
            return summary;
        }
    };
    summary.requested = project.records.len();
    info!(url = %index_url, records = summary.requested, "loading records");

    let mut pending = FuturesUnordered::new();
    for raw in &project.records {
        match fetch::resolve(index_url, raw) {
            Ok(url) => pending.push(fetch_row(transport, url)),
            Err(e) => {
                warn!(record = %raw, error = %e, "skipping record");
                summary.skipped += 1;
            }
        }
    }

    while let Some((url, result)) = pending.next().await {
        match result {
            Ok(row) => {
                table.append_row(row);
                summary.rendered += 1;
            }
            Err(e) => {
                warn!(%url, error = %e, "skipping record");
                summary.skipped += 1;
            }
        }
    }

    info!(
        rendered = summary.rendered,
        skipped = summary.skipped,
        "records loaded"
    );
    summary.project = Some(project);
    summary
}

async fn fetch_index<T>(transport: &T, index_url: &Url) -> Result<ProjectData, RecordError>
where
    T: Transport + ?Sized,
{
    let value = transport.get_json(index_url).await?;
    Ok(ProjectData::from_value(value)?)
}

async fn fetch_row<T>(transport: &T, url: Url) -> (Url, Result<String, RecordError>)
where
    T: Transport + ?Sized,
{
    let result = fetch_record(transport, &url).await;
    (url, result)
}

async fn fetch_record<T>(transport: &T, url: &Url) -> Result<String, RecordError>
where
    T: Transport + ?Sized,
{
    let value = transport.get_json(url).await?;
    let record = Record::from_value(value)?;
    debug!(label = %record.label, "rendering record");
    Ok(render::render_row(&record)?)
}
