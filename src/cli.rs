use crate::config::ConfigOverrides;
use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Help,
    Run { scene: PathBuf, request: RequestSource },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub command: CliCommand,
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub dry_run: bool,
}

impl CliOptions {
    pub fn parse_from_env() -> Result<Self> {
        Self::parse(env::args())
    }

    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = None;
        let mut overrides = ConfigOverrides::default();
        let mut dry_run = false;
        let mut positional = Vec::new();
        let mut iter = args.into_iter();
        let _ = iter.next(); // skip program name if present
        while let Some(raw) = iter.next() {
            let arg = raw.as_ref();
            match arg {
                "help" | "--help" | "-h" if positional.is_empty() => {
                    return Ok(Self { command: CliCommand::Help, config, overrides, dry_run });
                }
                "--dry-run" => dry_run = true,
                "-" => positional.push(arg.to_string()),
                flag if flag.starts_with("--") => {
                    let key = &flag[2..];
                    let value =
                        iter.next().ok_or_else(|| anyhow!("Expected a value after '{flag}'"))?.as_ref().to_string();
                    match key {
                        "config" => config = Some(PathBuf::from(value)),
                        "search-limit" => {
                            overrides.search_limit = Some(
                                value.parse::<usize>().with_context(|| format!("Invalid search limit '{value}'"))?,
                            );
                        }
                        "validate-sample" => {
                            overrides.validation_sample = Some(
                                value
                                    .parse::<usize>()
                                    .with_context(|| format!("Invalid validation sample '{value}'"))?,
                            );
                        }
                        _ => bail!(
                            "Unknown flag '{flag}'. Supported flags: --config, --search-limit, --validate-sample, --dry-run."
                        ),
                    }
                }
                other => positional.push(other.to_string()),
            }
        }

        let mut positional = positional.into_iter();
        let (Some(scene), Some(request)) = (positional.next(), positional.next()) else {
            bail!("Expected a scene path and a request path. Run 'scene_tool help' for usage.");
        };
        if let Some(extra) = positional.next() {
            bail!("Unexpected argument '{extra}'.");
        }
        let request = if request == "-" { RequestSource::Stdin } else { RequestSource::File(PathBuf::from(request)) };
        Ok(Self { command: CliCommand::Run { scene: PathBuf::from(scene), request }, config, overrides, dry_run })
    }
}
