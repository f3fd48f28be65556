//! CLI configuration from arguments and environment variables.

use std::path::PathBuf;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// State file, or a directory holding `sip-configurator-state.json`
    pub state_path: PathBuf,
    /// Where to write the export bundle, if anywhere
    pub export_path: Option<PathBuf>,
}

impl Config {
    /// Load from `SIP_STATE_PATH` / `SIP_EXPORT_PATH`, then let arguments
    /// override: `sip_cli [STATE_PATH] [--export OUT]`.
    pub fn load(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut config = Config::from_env();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--export" | "-e" => {
                    let out = args.next().ok_or("--export needs a file path")?;
                    config.export_path = Some(PathBuf::from(out));
                }
                flag if flag.starts_with('-') => return Err(format!("unknown option: {flag}")),
                path => config.state_path = PathBuf::from(path),
            }
        }
        Ok(config)
    }

    pub fn from_env() -> Self {
        Self {
            state_path: std::env::var("SIP_STATE_PATH").unwrap_or_else(|_| ".".into()).into(),
            export_path: std::env::var("SIP_EXPORT_PATH").ok().filter(|p| !p.is_empty()).map(PathBuf::from),
        }
    }
}
