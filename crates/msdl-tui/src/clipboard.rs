//! OSC 52 clipboard copy.
//!
//! Writes the escape sequence directly to stdout, which works over SSH and
//! inside terminal multiplexers that pass OSC 52 through. Callers fall back
//! to showing the text on screen when the write fails; whether the terminal
//! actually honours the sequence cannot be observed from here.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::{self, Write};

/// Copy `text` to the system clipboard via the controlling terminal.
pub fn copy(text: &str) -> io::Result<()> {
    let mut out = io::stdout();
    out.write_all(sequence(text).as_bytes())?;
    out.flush()
}

fn sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
