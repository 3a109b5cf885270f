//! System clipboard access
//!
//! Shells out to the platform clipboard tool rather than linking a GUI
//! toolkit:
//! - macOS: pbcopy / pbpaste
//! - Linux: xclip, falling back to xsel
//! - Windows: clip.exe / powershell Get-Clipboard

use anyhow::{bail, Context, Result};
use std::process::Command;

/// Copy text to the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to(Command::new("pbcopy"), text)
    }

    #[cfg(target_os = "linux")]
    {
        match pipe_to(
            {
                let mut cmd = Command::new("xclip");
                cmd.args(["-selection", "clipboard"]);
                cmd
            },
            text,
        ) {
            Ok(()) => Ok(()),
            Err(_) => pipe_to(
                {
                    let mut cmd = Command::new("xsel");
                    cmd.args(["--clipboard", "--input"]);
                    cmd
                },
                text,
            )
            .context("neither xclip nor xsel worked; install one of them"),
        }
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to(Command::new("clip"), text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        bail!("clipboard not supported on this platform");
    }
}

/// Read text from the system clipboard.
pub fn paste() -> Result<String> {
    #[cfg(target_os = "macos")]
    {
        read_from(Command::new("pbpaste"))
    }

    #[cfg(target_os = "linux")]
    {
        match read_from({
            let mut cmd = Command::new("xclip");
            cmd.args(["-selection", "clipboard", "-o"]);
            cmd
        }) {
            Ok(text) => Ok(text),
            Err(_) => read_from({
                let mut cmd = Command::new("xsel");
                cmd.args(["--clipboard", "--output"]);
                cmd
            })
            .context("neither xclip nor xsel worked; install one of them"),
        }
    }

    #[cfg(target_os = "windows")]
    {
        read_from({
            let mut cmd = Command::new("powershell");
            cmd.args(["-NoProfile", "-Command", "Get-Clipboard"]);
            cmd
        })
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        bail!("clipboard not supported on this platform");
    }
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn pipe_to(mut cmd: Command, text: &str) -> Result<()> {
    use std::io::Write;
    use std::process::Stdio;

    let program = cmd.get_program().to_string_lossy().to_string();
    let mut child = cmd
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn {}", program))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("failed to write to {}", program))?;
    }

    let status = child
        .wait()
        .with_context(|| format!("failed to wait for {}", program))?;

    if status.success() {
        Ok(())
    } else {
        bail!("{} exited with {}", program, status);
    }
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn read_from(mut cmd: Command) -> Result<String> {
    let program = cmd.get_program().to_string_lossy().to_string();
    let output = cmd
        .output()
        .with_context(|| format!("failed to run {}", program))?;

    if !output.status.success() {
        bail!("{} exited with {}", program, output.status);
    }

    String::from_utf8(output.stdout).with_context(|| format!("{} produced invalid UTF-8", program))
}
