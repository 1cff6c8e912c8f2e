//! `mmark render` command implementation.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Args;
use mmark_blocks::{ContainerKind, render_html};
use mmark_config::{CliSettings, Config};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Input document (`-` reads stdin).
    input: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep unprefixed lines inside containers (lazy continuation).
    #[arg(long)]
    lazy: bool,

    /// Container kind that consumes attribute lists (repeatable, overrides config).
    #[arg(long = "attach", value_name = "KIND")]
    attach: Vec<ContainerKind>,

    /// Let every container kind consume attribute lists.
    #[arg(long, conflicts_with = "attach")]
    attach_all: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let attach_attributes = if self.attach_all {
            Some(ContainerKind::ALL.to_vec())
        } else if self.attach.is_empty() {
            None
        } else {
            Some(self.attach.clone())
        };
        let cli_settings = CliSettings {
            attach_attributes,
            lazy_continuation: self.lazy.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            info!(path = %path.display(), "loaded configuration");
        }

        let source = self.read_input()?;
        let html = render_html(&source, config.parser_options());

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)
                    .map_err(|e| CliError::io(path.display().to_string(), e))?;
                output.success(&format!("Rendered to {}", path.display()));
            }
            None => {
                io::stdout()
                    .lock()
                    .write_all(html.as_bytes())
                    .map_err(|e| CliError::io("<stdout>", e))?;
            }
        }
        Ok(())
    }

    fn read_input(&self) -> Result<String, CliError> {
        if self.input.as_os_str() == "-" {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| CliError::io("<stdin>", e))?;
            return Ok(source);
        }
        std::fs::read_to_string(&self.input)
            .map_err(|e| CliError::io(self.input.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(input: PathBuf, output: PathBuf) -> RenderArgs {
        RenderArgs {
            input,
            output: Some(output),
            config: None,
            lazy: false,
            attach: Vec::new(),
            attach_all: false,
            verbose: false,
        }
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        let out = dir.path().join("doc.html");
        std::fs::write(&input, "{#q}\n> quoted\n").unwrap();

        args(input, out.clone()).execute(&Output::new()).unwrap();

        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            "<blockquote id=\"q\">\n<p>quoted</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_attach_all_flag() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        let out = dir.path().join("doc.html");
        std::fs::write(&input, "{#n}\nN> note\n").unwrap();

        let mut render = args(input, out.clone());
        render.attach_all = true;
        render.execute(&Output::new()).unwrap();

        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            "<aside id=\"n\" class=\"note\">\n<p>note</p>\n</aside>\n"
        );
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = args(dir.path().join("missing.md"), dir.path().join("out.html"))
            .execute(&Output::new())
            .unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn test_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        let out = dir.path().join("doc.html");
        let config = dir.path().join("custom.toml");
        std::fs::write(&input, "> a\nlazy\n").unwrap();
        std::fs::write(&config, "[parser]\nlazy_continuation = true\n").unwrap();

        let mut render = args(input, out.clone());
        render.config = Some(config);
        render.execute(&Output::new()).unwrap();

        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            "<blockquote>\n<p>a\nlazy</p>\n</blockquote>\n"
        );
    }
}
