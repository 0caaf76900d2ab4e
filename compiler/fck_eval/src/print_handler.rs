//! Where `print`, `log` and `clear` write.
//!
//! The CLI writes to stdout. Tests and embedding hosts capture into a
//! buffer, and hosts that only want values use the silent handler.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// ANSI "erase display, cursor home".
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Output target of a running program.
pub enum PrintHandler {
    Stdout,
    /// Output kept in memory, read back with `get_output`.
    Buffer(Mutex<String>),
    Silent,
}

impl PrintHandler {
    /// Append `text` and a newline.
    pub fn println(&self, text: &str) {
        self.emit(text, true);
    }

    /// Append `text` as is. Stdout is flushed so prompts appear before input
    /// is read.
    pub fn print(&self, text: &str) {
        self.emit(text, false);
    }

    fn emit(&self, text: &str, newline: bool) {
        match self {
            PrintHandler::Stdout => {
                let mut out = std::io::stdout().lock();
                let _ = out.write_all(text.as_bytes());
                if newline {
                    let _ = out.write_all(b"\n");
                }
                let _ = out.flush();
            }
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(text);
                if newline {
                    buffer.push('\n');
                }
            }
            PrintHandler::Silent => {}
        }
    }

    /// Captured text; empty unless this is a buffer.
    pub fn get_output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.lock().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    /// Wipe the terminal, or drop what the buffer holds.
    pub fn clear(&self) {
        match self {
            PrintHandler::Stdout => self.print(CLEAR_SCREEN),
            PrintHandler::Buffer(buffer) => buffer.lock().clear(),
            PrintHandler::Silent => {}
        }
    }
}

pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
