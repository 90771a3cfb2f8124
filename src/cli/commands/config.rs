use colored::Colorize;

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::{Result, UniscoutError};

/// Handle the config command
pub fn config(
    config: &mut Config,
    paths: &Paths,
    args: &ConfigArgs,
    format: OutputFormat,
) -> Result<String> {
    match &args.command {
        ConfigCommands::Show => config_show(config, format),
        ConfigCommands::Set { key, value } => config_set(config, paths, key, value, format),
        ConfigCommands::Path => config_path(paths, format),
    }
}

/// Show current configuration
fn config_show(config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Configuration".bold()));
            output.push_str(&"─".repeat(40));
            output.push('\n');

            output.push_str(&format!("\n{}\n", "[remote]".cyan()));
            output.push_str(&format!("  base_url = {}\n", config.remote.base_url));
            output.push_str(&format!("  timeout_secs = {}\n", config.remote.timeout_secs));

            output.push_str(&format!("\n{}\n", "[cache]".cyan()));
            output.push_str(&format!("  ttl_hours = {}\n", config.cache.ttl_hours));

            output.push_str(&format!("\n{}\n", "[output]".cyan()));
            output.push_str(&format!("  format = {}\n", config.output.format));

            Ok(output.trim_end().to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.parse().map_err(|_| {
        UniscoutError::InvalidArgument(format!("{key} must be a whole number, got '{value}'"))
    })
}

/// Set a configuration value
fn config_set(
    config: &mut Config,
    paths: &Paths,
    key: &str,
    value: &str,
    format: OutputFormat,
) -> Result<String> {
    match key {
        "remote.base_url" => config.set_base_url(value)?,
        "remote.timeout_secs" => {
            let secs = parse_number(key, value)?;
            if secs == 0 {
                return Err(UniscoutError::InvalidArgument(
                    "remote.timeout_secs must be greater than zero".to_string(),
                ));
            }
            config.remote.timeout_secs = secs;
        }
        "cache.ttl_hours" => config.cache.ttl_hours = parse_number(key, value)?,
        "output.format" => {
            let parsed = OutputFormat::parse(value).ok_or_else(|| {
                UniscoutError::InvalidArgument(format!(
                    "output.format must be 'pretty' or 'json', got '{value}'"
                ))
            })?;
            config.output.format = match parsed {
                OutputFormat::Pretty => "pretty".to_string(),
                OutputFormat::Json => "json".to_string(),
            };
        }
        _ => {
            return Err(UniscoutError::InvalidArgument(format!(
                "Unknown config key: {}. Valid keys: remote.base_url, remote.timeout_secs, cache.ttl_hours, output.format",
                key
            )));
        }
    }

    config.save_to(paths)?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Set {} = {}", "✓".green(), key.cyan(), value)),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "key": key,
                "value": value
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Show configuration file path
fn config_path(paths: &Paths, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("Config file: {}\n", paths.config_file.display()));
            output.push_str(&format!(
                "Exists: {}\n",
                if paths.config_exists() {
                    "yes".green()
                } else {
                    "no".yellow()
                }
            ));
            output.push_str(&format!("Store: {}", paths.store_dir.display()));
            Ok(output)
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "path": paths.config_file.display().to_string(),
                "exists": paths.config_exists(),
                "store_dir": paths.store_dir.display().to_string()
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Paths, Config) {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::under(temp_dir.path());
        (temp_dir, paths, Config::default())
    }

    #[test]
    fn test_set_base_url_persists() {
        let (_dir, paths, mut config) = setup();

        config_set(&mut config, &paths, "remote.base_url", "http://localhost:8080/", OutputFormat::Json)
            .unwrap();

        let loaded = Config::load_from(&paths).unwrap();
        assert_eq!(loaded.remote.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_set_ttl_rejects_non_number() {
        let (_dir, paths, mut config) = setup();

        let err = config_set(&mut config, &paths, "cache.ttl_hours", "soon", OutputFormat::Pretty)
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!paths.config_exists());
    }

    #[test]
    fn test_set_output_format() {
        let (_dir, paths, mut config) = setup();

        config_set(&mut config, &paths, "output.format", "JSON", OutputFormat::Pretty).unwrap();
        assert_eq!(config.output.format, "json");

        assert!(config_set(&mut config, &paths, "output.format", "yaml", OutputFormat::Pretty).is_err());
    }

    #[test]
    fn test_unknown_key() {
        let (_dir, paths, mut config) = setup();

        let err = config_set(&mut config, &paths, "api.token", "x", OutputFormat::Pretty).unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }
}
