//! Terminal shell for the FancyFilms media table.
//!
//! Prints the header chrome, mounts one `TableView` and hands the rendered
//! grid to the terminal `DataGrid`.

pub mod cli;
pub mod grid;

use std::io::Write;

use anyhow::Context;
use fancy_core::{RequestClient, ReqwestTransport, TableView, Transport, ViewState};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::grid::DataGrid;

pub const TITLE: &str = "FancyFilms";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// level. Logs go to stderr so stdout carries only the table.
pub fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")
}

/// Build the network-backed view described by `cli` and show it.
pub async fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let transport = ReqwestTransport::with_timeout(cli.timeout()).context("failed to build HTTP client")?;
    let client = RequestClient::with_config(transport, cli.client_config());
    let mut view = TableView::new(client, Some(cli.resources.clone()));
    tracing::debug!(resources = %cli.resources, sort_keys = cli.sort.len(), "mounting table view");
    let grid = DataGrid::new(cli.sort.clone());
    show(&mut view, &grid, out).await?;
    Ok(())
}

/// Mount `view` and write the header, the table and a status line.
///
/// A failed load is shown, not returned: only write errors fail.
pub async fn show<T: Transport>(
    view: &mut TableView<T>,
    grid: &DataGrid,
    out: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{}", "=".repeat(TITLE.len()))?;
    writeln!(out)?;

    view.mount().await;
    write!(out, "{}", grid.render(&view.render()))?;

    if let ViewState::Loaded(items) = view.state() {
        match items.len() {
            1 => writeln!(out, "1 entry")?,
            n => writeln!(out, "{n} entries")?,
        }
    }
    out.flush()
}
