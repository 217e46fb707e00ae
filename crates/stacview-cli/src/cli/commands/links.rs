//! `stacview links <path>` – list a resource's significant links.

use anyhow::Result;
use stacview_core::viewer::Viewer;

pub async fn run_links(viewer: &Viewer, path: &str) -> Result<()> {
    match viewer.load(path).await? {
        Some(view) if !view.links.is_empty() => {
            for link in &view.links {
                println!("{:<20} {}", link.label(), link.href);
            }
        }
        Some(_) => println!("No links."),
        None => println!("No content."),
    }
    Ok(())
}
