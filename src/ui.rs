/// User interface and status output utilities
///
/// This module handles:
/// - Serialized console output
/// - Colored terminal text
/// - Status message formatting

use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

/// Execute a function with exclusive access to console output
fn status_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stdout() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
            return true;
        }

        false
    }
}

/// Print a status message with "rspec-report: " prefix
pub fn status(s: &str) {
    status_lock(|| {
        print!("rspec-report: ");
        println!("{}", s);
    });
}

/// Print a warning with a colored "warning" prefix
pub fn print_warning(msg: &str) {
    status_lock(|| {
        print_color("warning", term::color::BRIGHT_YELLOW);
        println!(": {}", msg);
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    status_lock(|| {
        println!();
        print_color("error", term::color::BRIGHT_RED);
        println!(": {}", msg);
        println!();
    });
}
