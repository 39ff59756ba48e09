use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &mut App, code: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let was_premium = app.store.progress().is_premium;
    let activated = app.store.activate_premium(code);
    app.ensure_saved()?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "activated": activated,
                "isPremium": app.store.progress().is_premium,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if activated && was_premium {
                println!("Premium already active");
            } else if activated {
                println!("{}", paint("Premium activated, all days unlocked", Color::GREEN, use_color));
            } else {
                bail!("Invalid activation code");
            }
        }
    }

    Ok(())
}
