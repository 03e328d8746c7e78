//! System clipboard access through an external tool.
//!
//! The tool is picked in this order: `ERWIN_CLIPBOARD_CMD`, the `[clipboard] command` config key,
//! `wl-paste` on a Wayland session, `xclip -o`. Its stdout is the pasted text.

use crate::config::ClipboardConfig;
use std::io;
use std::process::{Command as ProcessCommand, ExitStatus, Stdio};

pub const CLIPBOARD_ENV: &str = "ERWIN_CLIPBOARD_CMD";

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Paste error: Neither wl-paste nor xclip found. Please install one.")]
    NoTool,
    #[error("Paste error: failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Paste error: {program} failed ({status}).")]
    Failed { program: String, status: ExitStatus },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardTool {
    program: String,
    args: Vec<String>,
}

impl ClipboardTool {
    /// Build a tool from `program arg...`; `None` if `words` is empty.
    pub fn from_words<I, S>(words: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = words.into_iter().map(Into::into);
        let program = words.next().filter(|p: &String| !p.is_empty())?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Resolve the tool from the process environment.
    pub fn resolve(config: &ClipboardConfig) -> Result<Self, ClipboardError> {
        Self::resolve_with(
            std::env::var(CLIPBOARD_ENV).ok().as_deref(),
            config,
            std::env::var("XDG_SESSION_TYPE").ok().as_deref(),
            |program| which::which(program).is_ok(),
        )
    }

    fn resolve_with(
        env_command: Option<&str>,
        config: &ClipboardConfig,
        session_type: Option<&str>,
        installed: impl Fn(&str) -> bool,
    ) -> Result<Self, ClipboardError> {
        if let Some(tool) = env_command.and_then(|cmd| Self::from_words(cmd.split_whitespace())) {
            return Ok(tool);
        }
        if let Some(tool) = config.command.as_ref().and_then(|cmd| Self::from_words(cmd.clone())) {
            return Ok(tool);
        }
        if session_type == Some("wayland") && installed("wl-paste") {
            return Self::from_words(["wl-paste"]).ok_or(ClipboardError::NoTool);
        }
        if installed("xclip") {
            return Self::from_words(["xclip", "-o"]).ok_or(ClipboardError::NoTool);
        }
        Err(ClipboardError::NoTool)
    }

    /// Run the tool synchronously and return its stdout.
    pub fn read(&self) -> Result<Vec<u8>, ClipboardError> {
        log::debug!("clipboard: running {} {:?}", self.program, self.args);
        let output = ProcessCommand::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| ClipboardError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ClipboardError::Failed {
                program: self.program.clone(),
                status: output.status,
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tool(words: &[&str]) -> ClipboardTool {
        ClipboardTool::from_words(words.iter().copied()).unwrap()
    }

    #[test]
    fn test_env_wins_over_config() {
        let config = ClipboardConfig {
            command: Some(vec!["from-config".into()]),
        };
        let resolved =
            ClipboardTool::resolve_with(Some("mytool --out"), &config, None, |_| true).unwrap();
        assert_eq!(resolved, tool(&["mytool", "--out"]));

        let resolved = ClipboardTool::resolve_with(Some("  "), &config, None, |_| true).unwrap();
        assert_eq!(resolved, tool(&["from-config"]));
    }

    #[test]
    fn test_detection_order() {
        let config = ClipboardConfig::default();
        let wayland =
            ClipboardTool::resolve_with(None, &config, Some("wayland"), |_| true).unwrap();
        assert_eq!(wayland.program(), "wl-paste");

        let x11 = ClipboardTool::resolve_with(None, &config, Some("x11"), |_| true).unwrap();
        assert_eq!(x11, tool(&["xclip", "-o"]));

        let fallback =
            ClipboardTool::resolve_with(None, &config, Some("wayland"), |p| p == "xclip").unwrap();
        assert_eq!(fallback.program(), "xclip");

        assert!(matches!(
            ClipboardTool::resolve_with(None, &config, None, |_| false),
            Err(ClipboardError::NoTool)
        ));
    }

    #[test]
    fn test_read_captures_stdout() {
        let bytes = tool(&["echo", "pasted"]).read().unwrap();
        assert_eq!(bytes, b"pasted\n");
    }

    #[test]
    fn test_failing_tool_is_reported() {
        assert!(matches!(
            tool(&["false"]).read(),
            Err(ClipboardError::Failed { .. })
        ));
        assert!(matches!(
            tool(&["/nonexistent/erwin-clip"]).read(),
            Err(ClipboardError::Spawn { .. })
        ));
    }
}
