//! Minimal TOML parser for the controller configuration
//!
//! Handles only the subset `lumen.toml` uses. It does NOT support the full
//! TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (integer, boolean)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Keys that are not listed stay at their defaults. Unknown sections and
//! keys are rejected so typos do not silently fall back to defaults.

use super::types::{ConfigError, ControllerConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed section header
    InvalidSection { line: usize },
    /// Section name not recognised
    UnknownSection { line: usize },
    /// Key not recognised in its section
    UnknownKey { line: usize },
    /// Line is not `key = value`
    InvalidLine { line: usize },
    /// Value has the wrong type or is out of range
    InvalidValue { line: usize },
    /// The parsed configuration failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Power,
    Auto,
    Session,
    Panel,
    Persist,
}

/// Parse TOML text into a validated [`ControllerConfig`]
pub fn parse_config(input: &str) -> Result<ControllerConfig, ParseError> {
    let mut config = ControllerConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line, line_no)?;
            continue;
        }

        let (key, value) =
            parse_key_value(line).ok_or(ParseError::InvalidLine { line: line_no })?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(line: &str, line_no: usize) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection { line: line_no })?
        .trim();

    match name {
        "power" => Ok(Section::Power),
        "auto" => Ok(Section::Auto),
        "session" => Ok(Section::Session),
        "panel" => Ok(Section::Panel),
        "persist" => Ok(Section::Persist),
        "" => Err(ParseError::InvalidSection { line: line_no }),
        _ => Err(ParseError::UnknownSection { line: line_no }),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: core::str::FromStr>(value: &str, line: usize) -> Result<T, ParseError> {
    // Allow TOML digit separators (11_000)
    let mut digits = heapless::String::<16>::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits
            .push(c)
            .map_err(|_| ParseError::InvalidValue { line })?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue { line })
}

fn parse_bool(value: &str, line: usize) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue { line }),
    }
}

fn apply_value(
    config: &mut ControllerConfig,
    section: Section,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ParseError> {
    let unknown = ParseError::UnknownKey { line };

    match section {
        Section::Root => return Err(unknown),
        Section::Power => match key {
            "threshold" => config.power.threshold = parse_int(value, line)?,
            "wake_settle_ms" => config.power.wake_settle_ms = parse_int(value, line)?,
            "asleep_poll_ms" => config.power.asleep_poll_ms = parse_int(value, line)?,
            _ => return Err(unknown),
        },
        Section::Auto => match key {
            "hysteresis" => config.auto.hysteresis = parse_int(value, line)?,
            "settle_ms" => config.auto.settle_ms = parse_int(value, line)?,
            "loop_interval_ms" => config.auto.loop_interval_ms = parse_int(value, line)?,
            _ => return Err(unknown),
        },
        Section::Session => match key {
            "step" => config.session.step = parse_int(value, line)?,
            "idle_timeout_ms" => config.session.idle_timeout_ms = parse_int(value, line)?,
            "poll_ms" => config.session.poll_ms = parse_int(value, line)?,
            _ => return Err(unknown),
        },
        Section::Panel => match key {
            "pulse_ms" => config.panel.pulse_ms = parse_int(value, line)?,
            "gap_ms" => config.panel.gap_ms = parse_int(value, line)?,
            "menu_open_ms" => config.panel.menu_open_ms = parse_int(value, line)?,
            "menu_close_ms" => config.panel.menu_close_ms = parse_int(value, line)?,
            "reset_open_ms" => config.panel.reset_open_ms = parse_int(value, line)?,
            "reset_hold_ms" => config.panel.reset_hold_ms = parse_int(value, line)?,
            "reset_release_ms" => config.panel.reset_release_ms = parse_int(value, line)?,
            "reset_close_ms" => config.panel.reset_close_ms = parse_int(value, line)?,
            _ => return Err(unknown),
        },
        Section::Persist => match key {
            "enabled" => config.persist.enabled = parse_bool(value, line)?,
            _ => return Err(unknown),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Lumen controller configuration

[power]
threshold = 650        # LED sense line
wake_settle_ms = 9_000

[auto]
hysteresis = 80

[session]
step = 10

[panel]
reset_hold_ms = 7000

[persist]
enabled = true
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.power.threshold, 650);
        assert_eq!(config.power.wake_settle_ms, 9_000);
        assert_eq!(config.power.asleep_poll_ms, 1_000);
        assert_eq!(config.auto.hysteresis, 80);
        assert_eq!(config.session.step, 10);
        assert_eq!(config.panel.reset_hold_ms, 7_000);
        assert_eq!(config.panel.pulse_ms, 65);
        assert!(config.persist.enabled);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config(""), Ok(ControllerConfig::default()));
        assert_eq!(
            parse_config("# nothing here\n\n"),
            Ok(ControllerConfig::default())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_config("[lights]\n"),
            Err(ParseError::UnknownSection { line: 1 })
        );
        assert_eq!(
            parse_config("[power\n"),
            Err(ParseError::InvalidSection { line: 1 })
        );
        assert_eq!(
            parse_config("[power]\nthreshhold = 3\n"),
            Err(ParseError::UnknownKey { line: 2 })
        );
        assert_eq!(
            parse_config("threshold = 3\n"),
            Err(ParseError::UnknownKey { line: 1 })
        );
        assert_eq!(
            parse_config("[auto]\nhysteresis\n"),
            Err(ParseError::InvalidLine { line: 2 })
        );
        assert_eq!(
            parse_config("[auto]\nhysteresis = -4\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[persist]\nenabled = yes\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[session]\nstep = 300\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_validation_applies() {
        assert_eq!(
            parse_config("[session]\npoll_ms = 0\n"),
            Err(ParseError::Invalid(ConfigError::ZeroInterval))
        );
    }
}
