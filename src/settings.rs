use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "pagecmd";

/// One `bind` entry: run `commands` when `key` is pressed in `context`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    #[serde(default = "default_context")]
    pub context: String,
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnbindConfig {
    pub key: String,
    #[serde(default = "default_context")]
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Display dpi / 96. Scroll deltas are multiplied by this but never
    /// shrunk below what the binding asked for.
    #[serde(default = "default_scroll_scale")]
    pub scroll_scale: f64,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: u32,

    #[serde(default = "default_true")]
    pub default_bindings: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unbind: Vec<UnbindConfig>,
}

fn default_true() -> bool {
    true
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_context() -> String {
    "any".to_string()
}

fn default_scroll_scale() -> f64 {
    1.0
}

fn default_max_zoom() -> u32 {
    2000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            scroll_scale: default_scroll_scale(),
            max_zoom: default_max_zoom(),
            default_bindings: true,
            bindings: Vec::new(),
            unbind: Vec::new(),
        }
    }
}

pub fn preferred_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_NAME).join(SETTINGS_FILENAME))
}

/// Load settings from `path`, or from the user config directory.
///
/// A missing file in the config directory is created with defaults. A file
/// that cannot be read or parsed is logged and defaults are used.
pub fn load_settings(path: Option<&Path>) -> Settings {
    if let Some(path) = path {
        return match load_settings_from_path(path) {
            Ok(settings) => settings,
            Err(e) => {
                error!("{e:#}");
                Settings::default()
            }
        };
    }

    let Some(path) = preferred_config_path() else {
        warn!("Could not determine config directory, using default settings");
        return Settings::default();
    };
    if !path.exists() {
        info!("Settings file not found, creating with defaults at {path:?}");
        let settings = Settings::default();
        save_settings_to_file(&settings, &path);
        return settings;
    }
    match load_settings_from_path(&path) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e:#}");
            Settings::default()
        }
    }
}

pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {path:?}"))?;
    let settings = parse_settings(&content)
        .with_context(|| format!("Failed to parse settings file {path:?}"))?;
    debug!("Loaded settings from {path:?}");
    Ok(settings)
}

pub fn parse_settings(content: &str) -> Result<Settings> {
    // an empty file deserializes to unit, not to a mapping
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let mut settings: Settings = serde_yaml::from_str(content)?;
    if settings.version > CURRENT_VERSION {
        warn!(
            "Settings version {} is newer than supported version {}",
            settings.version, CURRENT_VERSION
        );
    }
    if !settings.scroll_scale.is_finite() || settings.scroll_scale <= 0.0 {
        warn!(
            "Invalid scroll_scale {}, using {}",
            settings.scroll_scale,
            default_scroll_scale()
        );
        settings.scroll_scale = default_scroll_scale();
    }
    settings.version = CURRENT_VERSION;
    Ok(settings)
}

fn save_settings_to_file(settings: &Settings, path: &Path) {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory {parent:?}: {e}");
                return;
            }
        }
    }

    let content = generate_settings_yaml(settings);

    match fs::write(path, content) {
        Ok(()) => debug!("Saved settings to {path:?}"),
        Err(e) => error!("Failed to save settings to {path:?}: {e}"),
    }
}

#[derive(Serialize)]
struct BindingSections<'a> {
    bindings: &'a [BindingConfig],
    unbind: &'a [UnbindConfig],
}

fn generate_settings_yaml(settings: &Settings) -> String {
    let mut content = String::new();

    content.push_str(&format!("version: {}\n", settings.version));
    content.push_str(&format!("scroll_scale: {}\n", settings.scroll_scale));
    content.push_str(&format!("max_zoom: {}\n", settings.max_zoom));
    content.push_str(&format!("default_bindings: {}\n", settings.default_bindings));
    content.push('\n');

    content.push_str(BINDINGS_TEMPLATE);

    let sections = BindingSections {
        bindings: &settings.bindings,
        unbind: &settings.unbind,
    };
    match serde_yaml::to_string(&sections) {
        Ok(yaml) => content.push_str(&yaml),
        Err(e) => {
            error!("Failed to serialize key bindings: {e}");
            content.push_str("bindings: []\nunbind: []\n");
        }
    }

    content
}

const BINDINGS_TEMPLATE: &str = r#"# ============================================================================
# Key bindings
# ============================================================================
# key:      [shift-][ctrl-][alt-]<key>
#           <key> is a printable character, space, tab, return, enter,
#           backspace, esc, insert, delete, home, end, pgup, pgdn, left,
#           right, up, down, f1..f35, mousePress1..32, mouseRelease1..32,
#           mouseClick1..32
# context:  any, or a comma-separated list of fullScreen, window,
#           continuous, singlePage, overLink, offLink, outline, mainWin,
#           scrLockOn, scrLockOff
# commands: run in order; arguments go in parentheses, separated by commas
#
# Example:
#   - key: "ctrl-g"
#     context: "any"
#     commands: ["gotoPage(1)", "zoomFitWidth"]

"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_settings("").unwrap(), Settings::default());
        assert_eq!(parse_settings("\n  \n").unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = parse_settings("max_zoom: 800\n").unwrap();
        assert_eq!(settings.max_zoom, 800);
        assert_eq!(settings.scroll_scale, 1.0);
        assert!(settings.default_bindings);
    }

    #[test]
    fn parses_bindings() {
        let yaml = r#"
default_bindings: false
bindings:
  - key: "ctrl-g"
    commands: ["gotoPage(1)", "zoomFitWidth"]
  - key: "x"
    context: "fullScreen,overLink"
    commands: ["quit"]
unbind:
  - key: "q"
"#;
        let settings = parse_settings(yaml).unwrap();
        assert!(!settings.default_bindings);
        assert_eq!(settings.bindings.len(), 2);
        assert_eq!(settings.bindings[0].context, "any");
        assert_eq!(settings.bindings[0].commands, vec!["gotoPage(1)", "zoomFitWidth"]);
        assert_eq!(settings.bindings[1].context, "fullScreen,overLink");
        assert_eq!(
            settings.unbind,
            vec![UnbindConfig {
                key: "q".into(),
                context: "any".into()
            }]
        );
    }

    #[test]
    fn bad_scroll_scale_is_replaced() {
        let settings = parse_settings("scroll_scale: -2\n").unwrap();
        assert_eq!(settings.scroll_scale, 1.0);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse_settings("bindings: [unclosed").is_err());
        assert!(parse_settings("max_zoom: lots").is_err());
    }

    #[test]
    fn generated_yaml_round_trips() {
        let settings = Settings {
            max_zoom: 400,
            bindings: vec![BindingConfig {
                key: "ctrl-g".into(),
                context: "window".into(),
                commands: vec!["gotoPage(1)".into(), "zoomFitWidth".into()],
            }],
            unbind: vec![UnbindConfig {
                key: "q".into(),
                context: "any".into(),
            }],
            ..Settings::default()
        };
        let yaml = generate_settings_yaml(&settings);
        assert_eq!(parse_settings(&yaml).unwrap(), settings);
    }

    #[test]
    fn generated_yaml_quotes_awkward_keys() {
        let settings = Settings {
            bindings: vec![
                BindingConfig {
                    key: "\"".into(),
                    context: "any".into(),
                    commands: vec!["run(echo \"%f\" \\ done)".into()],
                },
                BindingConfig {
                    key: "\\".into(),
                    context: "window".into(),
                    commands: vec!["gotoPage(1)".into()],
                },
                BindingConfig {
                    key: "#".into(),
                    context: "any".into(),
                    commands: vec![": not a key".into()],
                },
            ],
            unbind: vec![UnbindConfig {
                key: "'".into(),
                context: "any".into(),
            }],
            ..Settings::default()
        };
        let yaml = generate_settings_yaml(&settings);
        assert_eq!(parse_settings(&yaml).unwrap(), settings);
    }

    #[test]
    fn unreadable_path_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert_eq!(load_settings(Some(&missing)), Settings::default());

        let path = dir.path().join("config.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "scroll_scale: 1.5").unwrap();
        assert_eq!(load_settings(Some(&path)).scroll_scale, 1.5);
    }
}
