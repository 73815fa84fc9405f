use crate::app::TechNerd;
use crate::display;
use crate::error::Result;

/// Returns whether a repository was found. Failure messages are rendered
/// here, so callers only pick the exit code.
pub async fn search_everything(app: &mut TechNerd, query: &str, json: bool) -> Result<bool> {
    if !json && !query.trim().is_empty() {
        println!("Searching repositories and jobs for '{}'...", query.trim());
    }

    let found = app.search(query).await.is_ok();
    if json {
        println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
    } else {
        display::render_report(app);
    }
    Ok(found)
}
