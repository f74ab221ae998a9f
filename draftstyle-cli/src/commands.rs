//! Command dispatch for draftstyle.
//!
//! Each command opens the preset store and the parameter store at the
//! configured paths, does its work and writes human-readable output to the
//! given writer. Nothing is cached between commands.

use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, instrument};

use draftstyle_shared::{
    AttributeKind, JsonParameterStore, PresetStore, StyleAttribute, StyleAttributes, StyleValue,
    find_matching_preset_name, parse_assignment, read_current_style, resolve_style,
    write_current_style,
};

use crate::config::{AppConfig, StyleCommand};

/// Run `command` against the files named in `app`, writing results to `out`.
#[instrument(skip(app, out))]
pub fn execute(command: &StyleCommand, app: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let store = PresetStore::new(&app.presets_path);

    match command {
        StyleCommand::List => list_presets(&store, app, out),
        StyleCommand::Show { name, raw } => show_preset(&store, name, *raw, out),
        StyleCommand::Save {
            name,
            overrides,
            force,
        } => save_preset(&store, app, name, overrides, *force, out),
        StyleCommand::Load { name } => load_preset(&store, app, name, out),
        StyleCommand::Delete { name } => delete_preset(&store, name, out),
        StyleCommand::Current => show_current(&store, app, out),
        StyleCommand::Path => {
            writeln!(out, "presets: {}", app.presets_path.display())?;
            writeln!(out, "parameters: {}", app.params_path.display())?;
            Ok(())
        }
    }
}

fn list_presets(store: &PresetStore, app: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let pdict = store.load();
    if pdict.is_empty() {
        writeln!(out, "No presets saved in {}", store.path().display())?;
        return Ok(());
    }

    let current = read_current_style(&JsonParameterStore::open(&app.params_path));
    let active = find_matching_preset_name(&pdict, &current);

    for name in pdict.keys() {
        let marker = if Some(name.as_str()) == active { '*' } else { ' ' };
        writeln!(out, "{} {}", marker, name)?;
    }
    Ok(())
}

fn show_preset(store: &PresetStore, name: &str, raw: bool, out: &mut dyn Write) -> Result<()> {
    let pdict = store.load();
    let Some(preset) = pdict.get(name) else {
        bail!("No preset named '{}'", name);
    };

    if raw {
        write_attributes(preset, out)
    } else {
        write_attributes(&resolve_style(preset), out)
    }
}

fn save_preset(
    store: &PresetStore,
    app: &AppConfig,
    name: &str,
    overrides: &[String],
    force: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut attrs = read_current_style(&JsonParameterStore::open(&app.params_path));
    for assignment in overrides {
        let (attribute, value) = parse_assignment(assignment)?;
        debug!("Override {} = {}", attribute, value);
        attrs.insert(attribute.key().to_string(), value);
    }

    let exists = store.load().contains_key(name);
    if exists && !force {
        bail!(
            "Preset '{}' already exists; use --force to overwrite it",
            name
        );
    }

    store
        .save_preset(name, attrs)
        .with_context(|| format!("Failed to save preset '{}'", name))?;

    info!("Saved preset '{}'", name);
    let verb = if exists { "Overwrote" } else { "Saved" };
    writeln!(out, "{} preset '{}'", verb, name)?;
    Ok(())
}

fn load_preset(
    store: &PresetStore,
    app: &AppConfig,
    name: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let pdict = store.load();
    let Some(preset) = pdict.get(name) else {
        bail!("No preset named '{}'", name);
    };

    let mut params = JsonParameterStore::open(&app.params_path);
    write_current_style(&mut params, preset);
    params
        .save()
        .with_context(|| format!("Failed to store preset '{}' as the current defaults", name))?;

    info!("Loaded preset '{}' into the current defaults", name);
    writeln!(out, "Loaded preset '{}'", name)?;
    Ok(())
}

fn delete_preset(store: &PresetStore, name: &str, out: &mut dyn Write) -> Result<()> {
    let removed = store
        .delete_preset(name)
        .with_context(|| format!("Failed to delete preset '{}'", name))?;
    if !removed {
        bail!("No preset named '{}'", name);
    }

    writeln!(out, "Deleted preset '{}'", name)?;
    Ok(())
}

fn show_current(store: &PresetStore, app: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let current = read_current_style(&JsonParameterStore::open(&app.params_path));
    write_attributes(&current, out)?;

    let pdict = store.load();
    match find_matching_preset_name(&pdict, &current) {
        Some(name) => writeln!(out, "Matches preset: {}", name)?,
        None => writeln!(out, "Matches preset: (none)")?,
    }
    Ok(())
}

/// One `Key = value` line per attribute; colors also show their hex form.
fn write_attributes(attrs: &StyleAttributes, out: &mut dyn Write) -> Result<()> {
    for (key, value) in attrs {
        match hex_color(key, value) {
            Some(hex) => writeln!(out, "{} = {} ({})", key, value, hex)?,
            None => writeln!(out, "{} = {}", key, value)?,
        }
    }
    Ok(())
}

fn hex_color(key: &str, value: &StyleValue) -> Option<String> {
    let attribute: StyleAttribute = key.parse().ok()?;
    if attribute.kind() != AttributeKind::Color {
        return None;
    }
    value.as_color().map(|color| color.to_string())
}
