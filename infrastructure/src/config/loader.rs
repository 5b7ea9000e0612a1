//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: &[&str] = &["sdk-bridge.toml", ".sdk-bridge.toml"];

/// Prefix for environment overrides, e.g. `SDK_BRIDGE_DISCOVERY__MAX_INSTANCES=5`
pub const ENV_PREFIX: &str = "SDK_BRIDGE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SDK_BRIDGE_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided); `.yaml`/`.yml` files are read as YAML
    /// 3. Project root: `./sdk-bridge.toml` or `./.sdk-bridge.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/sdk-bridge/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = if Self::is_yaml(path) {
                figment.merge(Yaml::file(path))
            } else {
                figment.merge(Toml::file(path))
            };
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn is_yaml(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/sdk-bridge/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sdk-bridge").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Config file locations being used, highest priority first
    pub fn config_sources(explicit: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();

        if let Some(path) = explicit {
            sources.push(ConfigSource {
                label: "Explicit",
                path: path.display().to_string(),
                found: path.exists(),
            });
        }

        match Self::project_config_path() {
            Some(path) => sources.push(ConfigSource {
                label: "Project",
                path: path.display().to_string(),
                found: true,
            }),
            None => sources.push(ConfigSource {
                label: "Project",
                path: PROJECT_CONFIG_FILES
                    .iter()
                    .map(|f| format!("./{}", f))
                    .collect::<Vec<_>>()
                    .join(" or "),
                found: false,
            }),
        }

        if let Some(path) = Self::global_config_path() {
            sources.push(ConfigSource {
                label: "Global",
                found: path.exists(),
                path: path.display().to_string(),
            });
        }

        sources
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [  ENV] {}*", ENV_PREFIX);
        for source in Self::config_sources(explicit) {
            let marker = if source.found { "FOUND" } else { "     " };
            println!("  [{}] {:<8} {}", marker, format!("{}:", source.label), source.path);
        }
        println!("  [     ] Default: built-in defaults");
    }
}

/// One candidate configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub path: String,
    pub found: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.providers.is_empty());
        assert_eq!(config.discovery.max_instances, 3);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("sdk-bridge"));
    }

    #[test]
    fn test_load_explicit_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[discovery]
max_instances = 7

[[providers]]
import = "stub"
construct = "Greeter"

[[providers.methods]]
name = "greet"
"#
        )
        .unwrap();

        let config = ConfigLoader::load(Some(file.path())).unwrap();
        assert_eq!(config.discovery.max_instances, 7);
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].methods[0].name, "greet");
        // Untouched sections keep their defaults
        assert_eq!(config.execution.raw_attributes, vec!["raw_data", "raw_attributes"]);
    }

    #[test]
    fn test_load_explicit_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            r#"
providers:
  - import: github
    construct: Github
    auth: "env: GITHUB_TOKEN"
    methods:
      - name: get_user
        rename: gh_get_user
        args:
          login:
            type: string
      - name: create_issue
        mode: write
"#
        )
        .unwrap();

        let config = ConfigLoader::load(Some(file.path())).unwrap();
        let provider = &config.providers[0];
        assert_eq!(provider.auth.as_deref(), Some("env: GITHUB_TOKEN"));
        assert_eq!(provider.methods[0].tool_name(), "gh_get_user");
        assert_eq!(provider.methods[0].args["login"]["type"], "string");
        assert!(provider.methods[1].mode.requires_confirmation());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[discovery]\nmax_instances = \"many\"").unwrap();

        assert!(ConfigLoader::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_is_yaml() {
        assert!(ConfigLoader::is_yaml(Path::new("config/github.yaml")));
        assert!(ConfigLoader::is_yaml(Path::new("a.YML")));
        assert!(!ConfigLoader::is_yaml(Path::new("a.toml")));
        assert!(!ConfigLoader::is_yaml(Path::new("yaml")));
    }

    #[test]
    fn test_config_sources_lists_explicit_first() {
        let sources = ConfigLoader::config_sources(Some(Path::new("/nonexistent/bridge.toml")));
        assert_eq!(sources[0].label, "Explicit");
        assert!(!sources[0].found);
        assert!(sources.iter().any(|s| s.label == "Project"));
    }
}
