//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BatchConfig;
use crate::domain::errors::BatchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "DRAWIO_BATCH_";

/// Loads configuration, optionally from a TOML file
///
/// This function:
/// 1. Starts from built-in defaults, or reads and parses the TOML file
/// 2. Substitutes `${VAR}` placeholders from the environment
/// 3. Applies `DRAWIO_BATCH_*` environment overrides
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns [`BatchError::ConfigValidation`] if:
/// - The file is missing or unreadable
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - An override or the final configuration is invalid
///
/// # Examples
///
/// ```no_run
/// use drawio_batch::config::loader::load_config;
/// use std::path::Path;
///
/// let config = load_config(Some(Path::new("drawio-batch.toml"))).expect("Failed to load config");
/// let defaults = load_config(None).expect("Defaults are valid");
/// ```
pub fn load_config(path: Option<&Path>) -> Result<BatchConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => BatchConfig::default(),
    };

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BatchError::ConfigValidation(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<BatchConfig> {
    if !path.exists() {
        return Err(BatchError::ConfigValidation(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BatchError::ConfigValidation(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;
    let config: BatchConfig = toml::from_str(&contents)?;

    tracing::debug!(path = %path.display(), "Loaded configuration file");
    Ok(config)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied verbatim.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BatchError::ConfigValidation(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        BatchError::ConfigValidation(format!("Invalid value for {ENV_PREFIX}{key}: '{value}'"))
    })
}

/// Applies environment variable overrides using the `DRAWIO_BATCH_` prefix
///
/// Variables follow the pattern `DRAWIO_BATCH_<SECTION>_<KEY>`, for example
/// `DRAWIO_BATCH_EXPORT_FORMAT` or `DRAWIO_BATCH_RENDERER_EXECUTABLE`.
fn apply_env_overrides(config: &mut BatchConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Some(val) = env_override("EXPORT_FORMAT") {
        config.export.format = val.parse().map_err(BatchError::ConfigValidation)?;
    }
    if let Some(val) = env_override("EXPORT_QUALITY") {
        config.export.quality = parse_override("EXPORT_QUALITY", &val)?;
    }
    if let Some(val) = env_override("EXPORT_SCALE") {
        config.export.scale = parse_override("EXPORT_SCALE", &val)?;
    }
    if let Some(val) = env_override("EXPORT_DIAGRAM_ID") {
        config.export.diagram_id = parse_override("EXPORT_DIAGRAM_ID", &val)?;
    }
    if let Some(val) = env_override("EXPORT_FAIL_FAST") {
        config.export.fail_fast = val.parse().unwrap_or(false);
    }

    // Renderer overrides
    if let Some(val) = env_override("RENDERER_EXECUTABLE") {
        config.renderer.executable = Some(val.into());
    }
    if let Some(val) = env_override("RENDERER_HARNESS_PATH") {
        config.renderer.harness_path = val.into();
    }
    if let Some(val) = env_override("RENDERER_RENDER_TIMEOUT_SECS") {
        config.renderer.render_timeout_secs =
            parse_override("RENDERER_RENDER_TIMEOUT_SECS", &val)?;
    }
    if let Some(val) = env_override("RENDERER_LAUNCH_TIMEOUT_SECS") {
        config.renderer.launch_timeout_secs =
            parse_override("RENDERER_LAUNCH_TIMEOUT_SECS", &val)?;
    }
    if let Some(val) = env_override("RENDERER_HEADLESS") {
        config.renderer.headless = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
