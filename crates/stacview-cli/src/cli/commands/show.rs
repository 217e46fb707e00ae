//! `stacview show <path>` – fetch a resource, classify it, render it.

use anyhow::Result;
use stacview_core::viewer::Viewer;

use crate::cli::render;

pub async fn run_show(viewer: &Viewer, path: &str) -> Result<()> {
    match viewer.load(path).await? {
        Some(view) => print!("{}", render::render(&view)),
        None => println!("No content."),
    }
    Ok(())
}
