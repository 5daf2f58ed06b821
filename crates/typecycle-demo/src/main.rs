#![forbid(unsafe_code)]

//! `typecycle` binary entry point.

use typecycle_demo::{app, cli};

fn main() {
    let opts = cli::Opts::parse();
    app::init_tracing();

    if let Err(e) = app::run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
