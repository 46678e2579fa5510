//! kitatime main entrypoint.

use kitatime::run;
use kitatime::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
