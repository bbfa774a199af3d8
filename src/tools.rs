use std::{
    ffi::OsStr,
    process::{Command, Stdio},
};

use crate::foundation::error::{SliceStripError, SliceStripResult};

/// Return `true` when `program -version` can be spawned and exits successfully.
///
/// Both `mrview` and ImageMagick answer `-version` without doing any work.
pub fn is_tool_on_path(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_tool_on_path(program: &str) -> SliceStripResult<()> {
    if is_tool_on_path(program) {
        Ok(())
    } else {
        Err(SliceStripError::missing_tool(program))
    }
}

/// Render a command line for logs.
pub fn display_command(cmd: &Command) -> String {
    let mut out = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        out.push(' ');
        out.push_str(&quote_arg(arg));
    }
    out
}

fn quote_arg(arg: &OsStr) -> String {
    let s = arg.to_string_lossy();
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("'{s}'")
    } else {
        s.into_owned()
    }
}

/// Run `cmd` to completion. A spawn failure or non-zero exit becomes a tool error carrying
/// the trimmed stderr.
pub fn run_tool(cmd: &mut Command) -> SliceStripResult<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(command = %display_command(cmd), "running external tool");

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SliceStripError::missing_tool(program.clone())
            } else {
                SliceStripError::tool(format!("failed to spawn {program}: {e}"))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SliceStripError::tool(format!(
            "{program} exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}
