use std::{ffi::OsString, io::Write, path::Path, process::Command};

use anyhow::{Context, Result, ensure};

/// Environment variable naming the program used to open rendered documents.
pub(crate) const VIEWER_ENV: &str = "QUAKEVIZ_VIEWER";

/// Write a rendered document to a kept temp file and open it in the platform viewer.
/// Blocks until the viewer launcher exits.
pub(crate) fn show_document(body: &str, extension: &str, verbose: u8) -> Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix("quakeviz-")
        .suffix(&format!(".{extension}"))
        .tempfile()
        .context("[display] create temp file")?;
    file.write_all(body.as_bytes())
        .context("[display] write temp file")?;
    let (_, path) = file.keep()
        .context("[display] keep temp file")?;

    if verbose > 0 { eprintln!("[display] opening {}", path.display()); }
    open_in_viewer(&path)
}

/// Launch the viewer for `path`, honoring the viewer override variable.
fn open_in_viewer(path: &Path) -> Result<()> {
    let (program, args) = viewer_command(std::env::var_os(VIEWER_ENV));

    let status = Command::new(&program)
        .args(&args)
        .arg(path)
        .status()
        .with_context(|| format!("[display] failed to launch viewer {:?}", program))?;
    ensure!(status.success(), "[display] viewer {:?} exited with {status}", program);

    Ok(())
}

/// Resolve the viewer program and its leading arguments.
fn viewer_command(override_var: Option<OsString>) -> (OsString, Vec<OsString>) {
    if let Some(value) = override_var.and_then(|v| v.into_string().ok()) {
        let mut parts = value.split_whitespace().map(OsString::from);
        if let Some(program) = parts.next() {
            return (program, parts.collect());
        }
    }

    if cfg!(target_os = "macos") {
        ("open".into(), vec![])
    } else if cfg!(target_os = "windows") {
        ("cmd".into(), vec!["/C".into(), "start".into(), "".into()])
    } else {
        ("xdg-open".into(), vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_splits_program_and_arguments() {
        let (program, args) = viewer_command(Some("firefox --new-window".into()));
        assert_eq!(program, "firefox");
        assert_eq!(args, vec![OsString::from("--new-window")]);
    }

    #[test]
    fn blank_override_falls_back_to_platform_default() {
        let (program, _) = viewer_command(Some("   ".into()));
        assert!(!program.is_empty());
    }
}
