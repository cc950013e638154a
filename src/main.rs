use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Url;

use smtview::config::ViewerConfig;
use smtview::page::{ConsoleHost, EditForm, HtmlTable};
use smtview::submit::SubmitOutcome;
use smtview::{loader, render, Viewer};

#[derive(Parser)]
#[command(
    name = "smtview",
    about = "Record table viewer and project editor for Sumatra Server",
    version,
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to $SMTVIEW_CONFIG, then ./smtview.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// HTTP Basic user name
    #[arg(long, global = true)]
    user: Option<String>,

    /// HTTP Basic password
    #[arg(long, global = true, env = "SMTVIEW_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a project's records and print the main table
    Show {
        /// Project URL (its JSON form lists the record URLs)
        url: String,

        /// Only records carrying this tag
        #[arg(long)]
        tags: Option<String>,

        /// Write a complete HTML page to this file instead
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Update a project's name and description
    Edit {
        /// Form action URL (the project URL)
        action: String,

        /// New project name
        #[arg(long)]
        name: String,

        /// New project description
        #[arg(long)]
        description: String,
    },

    /// List the projects visible on a server
    Projects {
        /// Server root URL
        url: String,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = ViewerConfig::resolve(cli.config.as_deref())?;
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }
    if cli.user.is_some() {
        config.auth.username = cli.user;
    }
    if cli.password.is_some() {
        config.auth.password = cli.password;
    }

    let viewer = Viewer::from_config(&config)?;

    match cli.command {
        Commands::Show { url, tags, output } => {
            let mut index = parse(&url)?;
            if let Some(tag) = tags.as_deref() {
                index = loader::with_tag_filter(&index, tag);
            }
            tracing::info!(%index, "Loading project records");
            let mut table = HtmlTable::new();
            let summary = viewer.load_records(&index, &mut table).await;

            match output {
                Some(path) => {
                    let html = render::render_page(
                        &config.output.page_title,
                        summary.project.as_ref(),
                        table.rows(),
                    )?;
                    std::fs::write(&path, html)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "Page written");
                }
                None => println!("{}", table.to_html()?),
            }
            eprintln!(
                "{} of {} records rendered ({} skipped)",
                summary.rendered, summary.requested, summary.skipped
            );
        }
        Commands::Edit {
            action,
            name,
            description,
        } => {
            let form = EditForm {
                action: parse(&action)?,
                name,
                description,
            };
            let mut host = ConsoleHost::default();
            let mut modal = ConsoleHost::default();
            match viewer.submit_edit(&form, &mut modal, &mut host).await {
                SubmitOutcome::Saved => {
                    println!("Project updated.");
                    if host.reload_requested {
                        let mut table = HtmlTable::new();
                        let summary = viewer.load_records(&form.action, &mut table).await;
                        if let Some(project) = summary.project {
                            println!("{:<12} : {}", "Name", project.name.unwrap_or_default());
                            println!(
                                "{:<12} : {}",
                                "Description",
                                project.description.unwrap_or_default()
                            );
                            println!("{:<12} : {}", "Records", summary.rendered);
                        }
                    }
                }
                SubmitOutcome::Failed(_) => anyhow::bail!("project update failed"),
            }
        }
        Commands::Projects { url } => {
            let projects = viewer.list_projects(&parse(&url)?).await?;
            if projects.is_empty() {
                println!("No projects found.");
            } else {
                println!("{:<20} | {:<30} | {:<20} | URI", "Id", "Name", "Last updated");
                println!("{:-<20}-|-{:-<30}-|-{:-<20}-|-{:-<30}", "", "", "", "");
                for p in projects {
                    println!(
                        "{:<20} | {:<30} | {:<20} | {}",
                        p.id,
                        p.name.as_deref().unwrap_or("-"),
                        p.last_updated.as_deref().unwrap_or("-"),
                        p.uri
                    );
                }
            }
        }
    }

    Ok(())
}

fn parse(raw: &str) -> Result<Url> {
    Ok(smtview::fetch::parse_url(raw)?)
}
