use crate::e_error::{FlowError, Result};
use crate::prelude::*;
use serde::Deserialize;

/// Per-run options for the flow pipeline.
///
/// Can be loaded from a TOML file:
///
/// ```toml
/// all = false
/// weak = true
/// declarations = "interfaces"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowOptions {
    /// Check every buffered file, marker or not.
    pub all: bool,
    /// Pass `--weak` to flow.
    pub weak: bool,
    /// Pass `--lib <path>` to flow.
    pub declarations: Option<PathBuf>,
}

impl FlowOptions {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| FlowError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| FlowError::io(path, e))?;
        let options = Self::from_toml_str(&text, path)?;
        debug!("loaded options from {}: {:?}", path.display(), options);
        Ok(options)
    }

    /// Applies command-line values on top of these options. Flags only switch
    /// booleans on; a declarations path from the command line wins.
    pub fn merged_with_cli(mut self, cli: &crate::Cli) -> Self {
        self.all |= cli.all;
        self.weak |= cli.weak;
        if let Some(decl) = &cli.declarations {
            self.declarations = Some(decl.clone());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_are_off() {
        let opts = FlowOptions::default();
        assert!(!opts.all);
        assert!(!opts.weak);
        assert!(opts.declarations.is_none());
    }

    #[test]
    fn parses_partial_toml() {
        let opts = FlowOptions::from_toml_str("weak = true\n", Path::new("flow-e.toml")).unwrap();
        assert_eq!(
            opts,
            FlowOptions {
                all: false,
                weak: true,
                declarations: None
            }
        );
    }

    #[test]
    fn unknown_keys_are_config_errors() {
        let err = FlowOptions::from_toml_str("strict = true\n", Path::new("flow-e.toml"))
            .unwrap_err();
        assert!(matches!(err, FlowError::Config { .. }));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow-e.toml");
        fs::write(&path, "all = true\ndeclarations = \"decls\"\n").unwrap();
        let opts = FlowOptions::from_toml_file(&path).unwrap();
        assert!(opts.all);
        assert_eq!(opts.declarations, Some(PathBuf::from("decls")));
    }

    #[test]
    fn cli_overrides_file() {
        let file = FlowOptions {
            all: true,
            weak: false,
            declarations: Some(PathBuf::from("from-file")),
        };
        let cli = crate::Cli::parse_from(["flow-e", "--weak", "--lib", "from-cli", "a.js"]);
        let merged = file.merged_with_cli(&cli);
        assert!(merged.all);
        assert!(merged.weak);
        assert_eq!(merged.declarations, Some(PathBuf::from("from-cli")));
    }
}
