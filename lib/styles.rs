//! Help and error styling for the `miniapp` CLI.

use clap::builder::styling::{AnsiColor, Styles};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Palette matching the validation report: cyan for locations and literals,
/// red for failures, green for valid input.
pub fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::BrightWhite.on_default().bold().underline())
        .usage(AnsiColor::BrightWhite.on_default().bold())
        .literal(AnsiColor::BrightCyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default())
        .error(AnsiColor::BrightRed.on_default().bold())
        .invalid(AnsiColor::BrightRed.on_default().bold())
        .valid(AnsiColor::BrightGreen.on_default().bold())
}
