//! Best-effort plain-text clipboard.

use arboard::Clipboard;
use pipegen_logging::{pipegen_info, pipegen_warn};

/// Keeps the clipboard handle alive: on X11 the copied text is only served
/// while the owning handle exists.
#[derive(Default)]
pub struct ClipboardSink {
    handle: Option<Clipboard>,
}

impl ClipboardSink {
    /// Copies `text`. A failure is logged and returned for the status line.
    pub fn copy(&mut self, text: &str) -> Result<(), arboard::Error> {
        let clipboard = match self.handle.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(|err| {
                pipegen_warn!("Clipboard unavailable: {}", err);
                err
            })?,
        };
        let clipboard = self.handle.insert(clipboard);
        match clipboard.set_text(text.to_owned()) {
            Ok(()) => {
                pipegen_info!("Copied {} bytes to clipboard", text.len());
                Ok(())
            }
            Err(err) => {
                pipegen_warn!("Clipboard copy failed: {}", err);
                Err(err)
            }
        }
    }
}
