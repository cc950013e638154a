//! Record rows and the page that hosts them.
//!
//! Rendering goes through askama, so every substituted value is HTML-escaped
//! by the template engine rather than concatenated into markup by hand.

use askama::Template;
use thiserror::Error;

use crate::model::{ProjectData, Record};

#[derive(Debug, Error)]
#[error("template rendering failed: {0}")]
pub struct RenderError(#[from] askama::Error);

/// One `<tr>` of the main table.
#[derive(Template)]
#[template(
    ext = "html",
    source = "<tr class=\"odd\">\
<td><a href=\"{{ label }}/\">{{ label }}</a></td>\
<td>{{ reason }}</td>\
<td>{{ outcome }}</td>\
<td>{{ duration }}\u{a0}s</td>\
<td>{{ timestamp }}</td>\
<td>{{ executable_name }} {{ executable_version }}</td>\
<td>{{ repository_url }}</td>\
<td>{{ version }}</td>\
<td>{{ main_file }}</td>\
<td>{{ script_arguments }}</td>\
<td>{% for tag in tags %}<a class=\"btn btn-mini\" href=\"?tags={{ tag }}\">{{ tag }}</a> {% endfor %}</td>\
</tr>"
)]
struct RecordRow<'a> {
    label: &'a str,
    reason: &'a str,
    outcome: &'a str,
    duration: String,
    timestamp: &'a str,
    executable_name: &'a str,
    executable_version: &'a str,
    repository_url: &'a str,
    version: &'a str,
    main_file: &'a str,
    script_arguments: &'a str,
    tags: &'a [String],
}

impl<'a> From<&'a Record> for RecordRow<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            label: &record.label,
            reason: &record.reason,
            outcome: &record.outcome,
            duration: record.display_duration(),
            timestamp: &record.timestamp,
            executable_name: &record.executable.name,
            executable_version: &record.executable.version,
            repository_url: &record.repository.url,
            version: &record.version,
            main_file: &record.main_file,
            script_arguments: &record.script_arguments,
            tags: &record.tags,
        }
    }
}

/// Render a record into a table-row fragment.
pub fn render_row(record: &Record) -> Result<String, RenderError> {
    Ok(RecordRow::from(record).render()?)
}

/// The `table.main` element: header row followed by the rendered rows.
#[derive(Template)]
#[template(
    ext = "html",
    source = "<table class=\"main\">
<tr><th>Label</th><th>Reason</th><th>Outcome</th><th>Duration</th><th>Date/Time</th>\
<th>Simulator</th><th>Repository</th><th>Version</th><th>Main file</th>\
<th>Arguments</th><th>Tags</th></tr>
{% for row in rows %}{{ row|safe }}
{% endfor %}</table>"
)]
struct RecordTable<'a> {
    rows: &'a [String],
}

/// Render the main table around already-rendered rows.
pub fn render_table(rows: &[String]) -> Result<String, RenderError> {
    Ok(RecordTable { rows }.render()?)
}

/// Standalone document hosting the main table.
#[derive(Template)]
#[template(
    ext = "html",
    source = "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"UTF-8\">
<title>{{ title }}</title>
</head>
<body>
<h1>{{ heading }}</h1>
{% if let Some(text) = description %}<p class=\"description\">{{ text }}</p>
{% endif %}{% if let Some(filter) = tag_filter %}<p class=\"filter\">Tagged: {{ filter }}</p>
{% endif %}{{ table|safe }}
</body>
</html>
"
)]
struct RecordPage<'a> {
    title: &'a str,
    heading: &'a str,
    description: Option<&'a str>,
    tag_filter: Option<&'a str>,
    table: String,
}

/// Render a full page around already-rendered rows.
pub fn render_page(
    title: &str,
    project: Option<&ProjectData>,
    rows: &[String],
) -> Result<String, RenderError> {
    let heading = project
        .and_then(|p| p.name.as_deref().or(p.id.as_deref()))
        .unwrap_or(title);
    let page = RecordPage {
        title,
        heading,
        description: project.and_then(|p| p.description.as_deref()),
        tag_filter: project.and_then(|p| p.tags.as_deref()),
        table: render_table(rows)?,
    };
    Ok(page.render()?)
}
