use crate::app::TechNerd;
use crate::display;
use crate::error::Result;

pub async fn featured_repository(app: &mut TechNerd, json: bool) -> Result<bool> {
    let picked = app.featured().await.is_ok();
    if json {
        println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
    } else if picked {
        display::render_report(app);
    } else {
        display::render_messages(app);
    }
    Ok(picked)
}
