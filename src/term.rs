//! Terminal styling shared by the four tool front-ends: color-capable
//! output via the `anstream`/`anstyle` ecosystem, auto-detecting `NO_COLOR`
//! and whether stdout/stderr are a terminal at all.

use anstyle::{AnsiColor, Color, Style};

pub use anstream::{eprint, eprintln, print, println};

/// Error style (red) -- use as `{ERROR}text{ERROR:#}`.
pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Hint style (dimmed) -- used for suspend/status messages.
pub const HINT: Style = Style::new().dimmed();

/// Print `message` to stderr in [`ERROR`] style and exit with `code`.
pub fn die(message: &str, code: i32) -> ! {
    eprintln!("{ERROR}{message}{ERROR:#}");
    std::process::exit(code);
}
