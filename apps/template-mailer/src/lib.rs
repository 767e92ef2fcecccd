//! Template Mailer
//!
//! Command-line front end for the block-based template engine.
//!
//! ## Commands
//!
//! - `render`: template document JSON → `email.html` + `email.txt`
//! - `resolve`: substitute placeholders in a single string
//! - `send`: render a document and deliver it through Resend
//!
//! Mail identity comes from `MAIL_*` variables, Resend credentials from
//! `RESEND_API_KEY` / `RESEND_API_URL`.

use clap::{Parser, Subcommand};
use core_config::tracing::init_tracing;
use core_config::{Environment, FromEnv, MailConfig};
use domain_notifications::{
    DataContext, EmailDocument, RenderOptions, RenderedEmail, ResendProvider, SendOutcome,
    SendTemplateRequest, TemplateMailer, TemplateRenderer, resolve,
};
use eyre::{Result, WrapErr};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render and send block-based template emails"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Render a template document to HTML and plain text
    Render {
        /// Template document JSON (`subject`, `preheader`, `blocks`, `data`, `branding`)
        #[arg(short, long)]
        input: PathBuf,

        /// Write email.html and email.txt here instead of printing them
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Include the preview header bar
        #[arg(long)]
        preview: bool,
    },

    /// Resolve placeholders in a single string
    Resolve {
        /// String containing {key} or {key|fallback} tokens
        #[arg(short, long)]
        template: String,

        /// Flat JSON object of placeholder values
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Render a template document and send it through Resend
    Send {
        #[arg(short, long)]
        input: PathBuf,

        /// Recipient address
        #[arg(long)]
        to: String,

        #[arg(long)]
        template_id: Option<String>,

        #[arg(long)]
        workflow_execution_id: Option<String>,
    },
}

/// Run one CLI command.
pub async fn run(cli: Cli) -> Result<()> {
    let environment = Environment::from_env();
    init_tracing(&environment);

    let mail_config = MailConfig::from_env().wrap_err("Failed to load mail configuration")?;

    match cli.command {
        Command::Render {
            input,
            out_dir,
            preview,
        } => {
            let document = load_document(&input)?;
            let options = RenderOptions::from_mail_config(&mail_config).with_preview(preview);
            let rendered = TemplateRenderer::new(options).render(&document);

            match out_dir {
                Some(dir) => {
                    let (html_path, text_path) = write_rendered(&rendered, &dir)?;
                    println!("Subject: {}", rendered.subject);
                    println!("HTML: {}", html_path.display());
                    println!("Text: {}", text_path.display());
                }
                None => {
                    println!("Subject: {}\n", rendered.subject);
                    println!("{}\n", rendered.html);
                    println!("{}", rendered.text);
                }
            }
        }
        Command::Resolve { template, data } => {
            let context = match data {
                Some(path) => load_context(&path)?,
                None => DataContext::new(),
            };
            println!("{}", resolve(&template, &context));
        }
        Command::Send {
            input,
            to,
            template_id,
            workflow_execution_id,
        } => {
            let document = load_document(&input)?;
            let provider =
                ResendProvider::from_env().wrap_err("Failed to configure Resend provider")?;
            let mailer = TemplateMailer::new(Arc::new(provider), mail_config);

            let mut request = SendTemplateRequest::new(to, document);
            request.template_id = template_id;
            request.workflow_execution_id = workflow_execution_id;

            match mailer.send(request).await.wrap_err("Failed to send email")? {
                SendOutcome::Sent { message_id, .. } => {
                    info!(message_id = %message_id, "Email accepted");
                    println!("Sent: {message_id}");
                }
                SendOutcome::Skipped { reason } => println!("Skipped: {reason}"),
            }
        }
    }

    Ok(())
}

/// Read and decode a template document.
pub fn load_document(path: &Path) -> Result<EmailDocument> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .wrap_err_with(|| format!("{} is not a valid template document", path.display()))
}

/// Read a flat JSON object of placeholder values.
pub fn load_context(path: &Path) -> Result<DataContext> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .wrap_err_with(|| format!("{} is not a flat object of strings", path.display()))
}

/// Write `email.html` and `email.txt` into `dir`, creating it if needed.
pub fn write_rendered(rendered: &RenderedEmail, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).wrap_err_with(|| format!("Failed to create {}", dir.display()))?;

    let html_path = dir.join("email.html");
    let text_path = dir.join("email.txt");
    fs::write(&html_path, &rendered.html)
        .wrap_err_with(|| format!("Failed to write {}", html_path.display()))?;
    fs::write(&text_path, &rendered.text)
        .wrap_err_with(|| format!("Failed to write {}", text_path.display()))?;

    Ok((html_path, text_path))
}
