//! auditcheck main entrypoint.

use auditcheck::run;
use auditcheck::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
