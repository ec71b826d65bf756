//! Terminal and display helpers shared by the command modules

use std::io::Write;
use std::path::Path;

/// Sets the terminal title via the OSC escape sequence
pub fn set_terminal_title(title: &str) {
    print!("\x1b]0;{title}\x07");
}

/// Sets the terminal title and flushes stdout so it shows up immediately
pub fn set_terminal_title_and_flush(title: &str) {
    set_terminal_title(title);
    // Flush is cosmetic; ignore errors
    let _ = std::io::stdout().flush();
}

/// Shortens a long path for table display, keeping the trailing components
pub fn shorten_path(path: &str, max_length: usize) -> String {
    if path.len() <= max_length {
        return path.to_string();
    }

    let tail: Vec<&str> = Path::new(path)
        .components()
        .rev()
        .take(2)
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    if tail.len() < 2 {
        return path.to_string();
    }

    format!(".../{}/{}", tail[1], tail[0])
}
