use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Terminal presentation choices resolved once at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let is_tty = std::io::stdout().is_terminal();
    let no_color = std::env::var_os("NO_COLOR").is_some();
    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok());

    let _ = UI_PREFS.set(resolve(flags, is_tty, no_color, term_width));
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

fn resolve(
    flags: &GlobalFlags,
    is_tty: bool,
    no_color: bool,
    term_width: Option<usize>,
) -> UiPrefs {
    let interactive = is_tty && !flags.quiet;
    UiPrefs {
        table_color: interactive && flags.format == OutputFormat::Table && !no_color,
        progress: interactive && flags.format != OutputFormat::Json,
        term_width: term_width.filter(|width| *width >= 40),
    }
}
