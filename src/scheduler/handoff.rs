//! Handing a post to the human: clipboard and browser.

use std::{
    env,
    io::{self, Read, Write},
    path::Path,
    process::{Command, Stdio},
};

use arboard::Clipboard;

/// Marks the helper process that keeps copied text on the clipboard.
pub const CLIPBOARD_HOLDER_ENV: &str = "HANDRAISER_CLIPBOARD_HOLDER";

/// Where resolved post text goes.
pub trait Handoff {
    /// Put `text` on the system clipboard.
    fn copy(&mut self, text: &str) -> Result<(), String>;

    /// Open `url` in the default browser.
    fn open(&mut self, url: &str) -> Result<(), String>;
}

/// The real desktop: system clipboard and default browser.
///
/// On Linux, X11 and Wayland clipboard contents belong to the process that set
/// them and vanish when it exits. There `copy` starts a detached copy of this
/// binary, flagged with [`CLIPBOARD_HOLDER_ENV`], which reads the text from
/// stdin and owns the clipboard until another program replaces it. Other
/// platforms keep the text after exit and are written to directly.
#[derive(Debug, Default)]
pub struct Desktop;

impl Handoff for Desktop {
    fn copy(&mut self, text: &str) -> Result<(), String> {
        let mut clipboard = Clipboard::new().map_err(|e| format!("clipboard unavailable: {e}"))?;
        if cfg!(target_os = "linux") {
            drop(clipboard);
            spawn_holder(text)
        } else {
            clipboard
                .set_text(text)
                .map_err(|e| format!("failed to copy to clipboard: {e}"))
        }
    }

    fn open(&mut self, url: &str) -> Result<(), String> {
        open::that(url).map_err(|e: io::Error| format!("failed to open {url}: {e}"))
    }
}

/// Prints instead of touching the desktop. Used for `--dry-run`.
#[derive(Debug, Default)]
pub struct Echo;

impl Handoff for Echo {
    fn copy(&mut self, text: &str) -> Result<(), String> {
        println!("{text}");
        Ok(())
    }

    fn open(&mut self, url: &str) -> Result<(), String> {
        eprintln!("Would open {url}");
        Ok(())
    }
}

/// Whether this process was started to hold the clipboard.
pub fn is_clipboard_holder() -> bool {
    env::var_os(CLIPBOARD_HOLDER_ENV).is_some()
}

/// Holder process body: take the text from stdin and keep it on the clipboard.
///
/// Blocks until another program takes the clipboard over.
pub fn hold_clipboard() -> Result<(), String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| format!("failed to read clipboard text: {e}"))?;

    let mut clipboard = Clipboard::new().map_err(|e| format!("clipboard unavailable: {e}"))?;
    set_and_hold(&mut clipboard, text).map_err(|e| format!("failed to copy to clipboard: {e}"))
}

#[cfg(target_os = "linux")]
fn set_and_hold(clipboard: &mut Clipboard, text: String) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    clipboard.set().wait().text(text)
}

#[cfg(not(target_os = "linux"))]
fn set_and_hold(clipboard: &mut Clipboard, text: String) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

#[allow(clippy::zombie_processes)] // The holder outlives this process.
fn spawn_holder(text: &str) -> Result<(), String> {
    let exe = env::current_exe().map_err(|e| format!("clipboard unavailable: {e}"))?;
    let mut holder = holder_command(&exe)
        .spawn()
        .map_err(|e| format!("clipboard unavailable: {e}"))?;

    let mut stdin = holder
        .stdin
        .take()
        .ok_or("clipboard unavailable: holder has no stdin")?;
    stdin
        .write_all(text.as_bytes())
        .map_err(|e| format!("failed to copy to clipboard: {e}"))
}

fn holder_command(exe: &Path) -> Command {
    let mut command = Command::new(exe);
    command
        .env(CLIPBOARD_HOLDER_ENV, "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::ffi::OsStr;

    #[test]
    fn holder_runs_this_binary_flagged_by_environment() {
        let command = holder_command(Path::new("/usr/local/bin/handraiser"));

        assert_eq!(command.get_program(), "/usr/local/bin/handraiser");
        assert!(command.get_args().next().is_none());
        assert!(
            command
                .get_envs()
                .any(|(key, value)| key == CLIPBOARD_HOLDER_ENV && value == Some(OsStr::new("1")))
        );
    }

    #[test]
    fn ordinary_runs_are_not_holders() {
        assert!(!is_clipboard_holder());
    }
}
