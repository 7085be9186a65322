//! Example application settings with a repeating list element.
//!
//! Run with: `cargo run --example app_settings`

use xmlsettings::prelude::*;

/// Application settings backing an imaginary editor.
#[derive(Debug, Default)]
struct AppSettings {
    window_title: Option<String>,
    width: i32,
    recent_files: Vec<String>,
    recent_cursor: usize,
}

/// One repeating element means the payload can be the slot itself.
type Slot = Option<String>;

fn schema() -> SettingsSchema<AppSettings, Slot> {
    SchemaBuilder::<AppSettings, Slot>::new("appSettings")
        .default_namespace("http://schemas.example.com/settings/app/2020")
        .add_child_element(
            "WindowTitle",
            getter(|s: &AppSettings, _| s.window_title.clone()),
            setter(|s: &mut AppSettings, v, _| {
                s.window_title = Some(v.to_string());
                Ok(())
            }),
        )
        .add_element(
            "Width",
            getter(|s: &AppSettings, _| Some(s.width.to_string())),
            setter(|s: &mut AppSettings, v, _| {
                s.width = v.parse().map_err(|e| ValueError::new("Width", v, e))?;
                Ok(())
            }),
        )
        .add_element("RecentFiles", None, None)
        .add_child_element(
            "File",
            getter(|_s: &AppSettings, item: Option<&RepeatItem<Slot>>| {
                item.and_then(|i| i.payload().clone())
            }),
            setter(|_s: &mut AppSettings, v, item: Option<&RepeatItem<Slot>>| {
                if let Some(item) = item {
                    *item.payload_mut() = Some(v.to_string());
                }
                Ok(())
            }),
        )
        .set_repeating(
            // surfaces the entry the cursor points at when writing; an empty
            // slot to build into when reading
            |s: &mut AppSettings, _| {
                if s.recent_cursor > 0 {
                    Some(s.recent_files[s.recent_cursor - 1].clone())
                } else {
                    None
                }
            },
            |s: &mut AppSettings, _| {
                if s.recent_cursor < s.recent_files.len() {
                    s.recent_cursor += 1;
                    true
                } else {
                    s.recent_cursor = 0;
                    false
                }
            },
            |s: &mut AppSettings, item| {
                if let Some(v) = item.payload_mut().take() {
                    s.recent_files.push(v);
                }
            },
        )
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let schema = schema();

    let mut settings = AppSettings {
        window_title: Some("scratch.txt - editor".to_string()),
        width: 1280,
        recent_files: vec!["scratch.txt".to_string(), "notes.md".to_string()],
        recent_cursor: 0,
    };

    let xml = serialize(&schema, &mut settings)?;
    println!("serialized:\n{xml}\n");

    let mut read_back = AppSettings::default();
    deserialize(&schema, &mut read_back, &xml)?;
    println!("read back: {read_back:#?}");

    Ok(())
}
