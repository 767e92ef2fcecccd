//! Template Mailer CLI Entry Point

use clap::Parser;
use core_config::tracing::install_color_eyre;
use eyre::Result;
use template_mailer::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    template_mailer::run(Cli::parse()).await
}
