//! Terminal styling for the non-interactive output

use console::{style, Emoji};

use crate::pipeline::Settings;

// Emoji icons with fallbacks for terminals that don't support them
pub static MENU: Emoji<'_, '_> = Emoji("📜 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("shellmenu").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!("    {}", style("Shell commands, one keypress away").dim());
    println!("    {}", style("━".repeat(50)).dim());
}

/// Print where the menu is read from
pub fn print_settings(settings: &Settings) {
    println!(
        "    {} Settings: {} {}",
        FOLDER,
        settings.path.display(),
        style(format!("({})", settings.encoding.name())).dim()
    );
    println!("    {} Root:     [{}]", MENU, settings.root);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an error with its causes on stderr
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", style("error:").red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", style("caused by:").dim(), cause);
    }
}
