//! # Block Builder Entry Point
//!
//! Starts an interactive session, optionally from a JSON config file.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [config.json]
//! ```

use std::path::PathBuf;

fn main() {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    if let Err(e) = block_builder::run(config_path.as_deref()) {
        log::error!("{}", e);
        eprintln!("block-builder: {}", e);
        std::process::exit(1);
    }
}
