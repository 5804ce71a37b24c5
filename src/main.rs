//! hdx - herodex command-line entry point

use herodex::ui::output;

fn main() {
    if let Err(e) = herodex::cli::run() {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
