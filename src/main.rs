//! Sciter application bundler CLI.
//!
//! Reads build parameters from flags, a saved project or a config file,
//! then runs the packaging pipeline and exits with its result code.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match scapp_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
