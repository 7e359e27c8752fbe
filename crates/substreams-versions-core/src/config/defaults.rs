//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "substreams-versions.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "substreams-versions.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".substreams-versions.yaml";

/// Per-module manifest file name
pub const DEFAULT_MANIFEST_FILE: &str = "substreams.yaml";

/// Prefix written in front of every manifest version
pub const DEFAULT_VERSION_PREFIX: &str = "v";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".substreams-versions.toml",
    ]
}
