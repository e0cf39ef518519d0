//! punchclock main entrypoint.

use punchclock::run;
use punchclock::ui::messages::{error, warning};

fn main() {
    println!();
    if let Err(e) = run() {
        // Validation and state-conflict outcomes are normal usage and are
        // surfaced verbatim; everything else is a system fault.
        if e.is_user_error() {
            warning(e.to_string());
        } else {
            error(format!("Error: {}", e));
        }
        std::process::exit(1);
    }
}
