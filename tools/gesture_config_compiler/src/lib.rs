//! Compiles `config/gesture.toml` into the `GESTURE_CONFIG` constant consumed by
//! the `floatball` crate, and loads the same schema at runtime for tools.

use std::{fmt, fs, path::Path};

use serde::Deserialize;

const DEFAULT_SNAP_BACK_DURATION_MS: u32 = 160;
const DEFAULT_CENTERED_LONG_PRESS: &str = "go_home";

/// TOML label to `OverlayAction` variant name.
pub const ACTION_LABELS: [(&str, &str); 5] = [
    ("open_menu", "OpenMenu"),
    ("navigate_back", "NavigateBack"),
    ("navigate_recent", "NavigateRecent"),
    ("go_home", "GoHome"),
    ("open_notifications", "OpenNotifications"),
];

pub const NO_ACTION_LABEL: &str = "none";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GestureFile {
    pub timing: TimingSection,
    pub distance: DistanceSection,
    #[serde(default)]
    pub outcomes: OutcomesSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TimingSection {
    pub click_timeout_ms: u64,
    pub long_press_timeout_ms: u64,
    #[serde(default = "default_snap_back_duration_ms")]
    pub snap_back_duration_ms: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DistanceSection {
    pub move_slop: f32,
    pub max_distance: f32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutcomesSection {
    #[serde(default = "default_centered_long_press")]
    pub centered_long_press: String,
}

impl Default for OutcomesSection {
    fn default() -> Self {
        Self {
            centered_long_press: default_centered_long_press(),
        }
    }
}

fn default_snap_back_duration_ms() -> u32 {
    DEFAULT_SNAP_BACK_DURATION_MS
}

fn default_centered_long_press() -> String {
    DEFAULT_CENTERED_LONG_PRESS.to_string()
}

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

pub fn parse_gesture_str(source: &str) -> Result<GestureFile, ConfigCompilerError> {
    toml::from_str(source).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn parse_gesture_file(path: &Path) -> Result<GestureFile, ConfigCompilerError> {
    let source = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_gesture_str(&source)
}

/// Resolves an outcome label to its `OverlayAction` variant name, `None` for
/// the explicit no-action label.
pub fn action_variant(label: &str) -> Result<Option<&'static str>, ConfigCompilerError> {
    let label = label.trim();
    if label.eq_ignore_ascii_case(NO_ACTION_LABEL) {
        return Ok(None);
    }
    ACTION_LABELS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label))
        .map(|(_, variant)| Some(*variant))
        .ok_or_else(|| {
            ConfigCompilerError::Validation(format!(
                "outcomes.centered_long_press has unknown action `{label}`"
            ))
        })
}

pub fn validate_config(file: &GestureFile) -> Result<(), ConfigCompilerError> {
    let invalid = |msg: &str| Err(ConfigCompilerError::Validation(msg.to_string()));

    if file.timing.click_timeout_ms == 0 {
        return invalid("timing.click_timeout_ms must be > 0");
    }
    if file.timing.long_press_timeout_ms == 0 {
        return invalid("timing.long_press_timeout_ms must be > 0");
    }
    if !file.distance.move_slop.is_finite() || file.distance.move_slop < 0.0 {
        return invalid("distance.move_slop must be a finite value >= 0");
    }
    if !file.distance.max_distance.is_finite() || file.distance.max_distance <= 0.0 {
        return invalid("distance.max_distance must be a finite value > 0");
    }
    if file.distance.max_distance <= file.distance.move_slop {
        return invalid("distance.max_distance must be > distance.move_slop");
    }
    action_variant(&file.outcomes.centered_long_press)?;
    Ok(())
}

pub fn render_generated_config(file: &GestureFile) -> String {
    let centered = match action_variant(&file.outcomes.centered_long_press) {
        Ok(Some(variant)) => format!("Some(OverlayAction::{variant})"),
        _ => "None".to_string(),
    };

    let mut out = String::new();
    out.push_str("// @generated by gesture_config_compiler. Do not edit.\n");
    out.push_str("pub const GESTURE_CONFIG: GestureConfig = GestureConfig {\n");
    out.push_str(&format!(
        "    click_timeout_ms: {},\n",
        file.timing.click_timeout_ms
    ));
    out.push_str(&format!(
        "    long_press_timeout_ms: {},\n",
        file.timing.long_press_timeout_ms
    ));
    out.push_str(&format!(
        "    move_slop: {},\n",
        float_literal(file.distance.move_slop)
    ));
    out.push_str(&format!(
        "    max_distance: {},\n",
        float_literal(file.distance.max_distance)
    ));
    out.push_str(&format!(
        "    snap_back_duration_ms: {},\n",
        file.timing.snap_back_duration_ms
    ));
    out.push_str(&format!("    centered_long_press: {centered},\n"));
    out.push_str("};\n");
    out
}

pub fn generate_from_str(source: &str) -> Result<String, ConfigCompilerError> {
    let file = parse_gesture_str(source)?;
    validate_config(&file)?;
    Ok(render_generated_config(&file))
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let file = load_config_file(path)?;
    Ok(render_generated_config(&file))
}

/// Parses and validates a gesture config file.
pub fn load_config_file(path: &Path) -> Result<GestureFile, ConfigCompilerError> {
    let file = parse_gesture_file(path)?;
    validate_config(&file)?;
    Ok(file)
}

fn float_literal(value: f32) -> String {
    let text = format!("{value:?}");
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}
