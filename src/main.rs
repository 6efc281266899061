//! `tix` - support ticket desk.
//!
//! Seeds an in-memory ticket table, applies one command (or a scripted
//! session of actions) and renders the result. Nothing is persisted.

use support_tickets::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
