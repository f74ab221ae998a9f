//! CLI argument parsing for draftstyle.
//!
//! This module handles command line argument parsing using clap and provides
//! a structured representation of the requested command that the rest of the
//! configuration layer and the command dispatcher consume.

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};

/// Preset and live-default operations selectable from the command line
#[derive(Debug, Clone, PartialEq)]
pub enum StyleCommand {
    /// List saved presets, marking the one matching the live defaults
    List,
    /// Print a preset's attributes
    Show { name: String, raw: bool },
    /// Snapshot the live defaults (plus overrides) as a named preset
    Save {
        name: String,
        overrides: Vec<String>,
        force: bool,
    },
    /// Make a preset the live defaults
    Load { name: String },
    /// Remove a preset
    Delete { name: String },
    /// Print the live defaults and the preset they match
    Current,
    /// Print the resolved file locations
    Path,
}

/// CLI configuration structure containing all parsed command line arguments
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub verbose: bool,
    pub presets_path: Option<String>,
    pub params_path: Option<String>,
    pub command: StyleCommand,
}

impl CliConfig {
    /// Parse CLI arguments and create CliConfig
    pub fn from_args() -> Result<Self> {
        let matches = Self::build_cli().get_matches();
        Self::from_matches(&matches)
    }

    /// Create CliConfig from pre-parsed ArgMatches (useful for testing)
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let verbose = matches.get_flag("verbose");
        let presets_path = matches.get_one::<String>("presets").cloned();
        let params_path = matches.get_one::<String>("params").cloned();

        let required_name = |sub: &ArgMatches| -> Result<String> {
            sub.get_one::<String>("name")
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Preset name is required"))
        };

        let command = match matches.subcommand() {
            Some(("list", _)) => StyleCommand::List,
            Some(("show", sub)) => StyleCommand::Show {
                name: required_name(sub)?,
                raw: sub.get_flag("raw"),
            },
            Some(("save", sub)) => StyleCommand::Save {
                name: required_name(sub)?,
                overrides: sub
                    .get_many::<String>("set")
                    .map(|vals| vals.cloned().collect())
                    .unwrap_or_default(),
                force: sub.get_flag("force"),
            },
            Some(("load", sub)) => StyleCommand::Load {
                name: required_name(sub)?,
            },
            Some(("delete", sub)) => StyleCommand::Delete {
                name: required_name(sub)?,
            },
            Some(("current", _)) => StyleCommand::Current,
            Some(("path", _)) => StyleCommand::Path,
            Some((other, _)) => return Err(anyhow::anyhow!("Unknown command '{}'", other)),
            None => StyleCommand::List,
        };

        Ok(Self {
            verbose,
            presets_path,
            params_path,
            command,
        })
    }

    /// Build the clap Command structure
    pub fn build_cli() -> Command {
        let name_arg = || {
            Arg::new("name")
                .value_name("NAME")
                .required(true)
                .help("Preset name (case-sensitive)")
        };

        Command::new("draftstyle")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Manage default drawing styles and named style presets")
            .long_about("Reads and writes the default styling used for new drawing objects \
                       (colors, line widths, text and dimension parameters) and keeps named \
                       presets of those styles in a JSON file. Presets saved by older versions \
                       keep working: missing point and annotation attributes inherit the line \
                       attributes they were split from.")
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .global(true)
                    .action(clap::ArgAction::SetTrue)
                    .help("Enable verbose logging")
                    .long_help("Enable verbose debug logging. This will show which files are \
                              read and written and any preset entries that had to be ignored."),
            )
            .arg(
                Arg::new("presets")
                    .long("presets")
                    .value_name("PATH")
                    .global(true)
                    .help("Preset file to use")
                    .long_help("Path of the JSON preset file. Overrides the DRAFTSTYLE_PRESETS \
                              environment variable. Default: <data dir>/draftstyle/StylePresets.json"),
            )
            .arg(
                Arg::new("params")
                    .long("params")
                    .value_name("PATH")
                    .global(true)
                    .help("Live default parameter file to use")
                    .long_help("Path of the JSON file holding the live default style parameters. \
                              Overrides the DRAFTSTYLE_PARAMS environment variable. \
                              Default: <data dir>/draftstyle/parameters.json"),
            )
            .subcommand(Command::new("list").about("List saved presets (default command)"))
            .subcommand(
                Command::new("show")
                    .about("Show a preset's attributes")
                    .arg(name_arg())
                    .arg(
                        Arg::new("raw")
                            .long("raw")
                            .action(clap::ArgAction::SetTrue)
                            .help("Print only the stored attributes, without fallbacks or defaults"),
                    ),
            )
            .subcommand(
                Command::new("save")
                    .about("Save the current defaults as a preset")
                    .arg(name_arg())
                    .arg(
                        Arg::new("set")
                            .long("set")
                            .value_name("KEY=VALUE")
                            .action(clap::ArgAction::Append)
                            .help("Override one attribute before saving")
                            .long_help("Override one attribute of the snapshot before saving. \
                                      Can be specified multiple times. Colors accept #RRGGBB, \
                                      #RRGGBBAA or a packed integer; lengths are in mm."),
                    )
                    .arg(
                        Arg::new("force")
                            .short('f')
                            .long("force")
                            .action(clap::ArgAction::SetTrue)
                            .help("Overwrite an existing preset with the same name"),
                    ),
            )
            .subcommand(
                Command::new("load")
                    .about("Make a preset the current defaults")
                    .arg(name_arg()),
            )
            .subcommand(
                Command::new("delete")
                    .about("Delete a preset")
                    .arg(name_arg()),
            )
            .subcommand(
                Command::new("current")
                    .about("Show the current defaults and the preset they match"),
            )
            .subcommand(Command::new("path").about("Show the preset and parameter file paths"))
    }

    /// Validate CLI configuration
    pub fn validate(&self) -> Result<()> {
        let name = match &self.command {
            StyleCommand::Show { name, .. }
            | StyleCommand::Save { name, .. }
            | StyleCommand::Load { name }
            | StyleCommand::Delete { name } => Some(name),
            _ => None,
        };

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Preset name cannot be empty"));
            }
        }

        for path in [&self.presets_path, &self.params_path].into_iter().flatten() {
            if path.is_empty() {
                return Err(anyhow::anyhow!("File paths cannot be empty"));
            }
        }

        Ok(())
    }
}
