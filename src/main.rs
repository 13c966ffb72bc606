//! Kodegen Bundler Embed - embed frameworks build-phase script generator.
//!
//! This binary renders the script an Xcode build phase runs to embed, strip
//! and sign vendored frameworks, or prints what that script would do.

use kodegen_bundler_embed::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            cli::report_error(&e);
            1
        }
    };

    process::exit(exit_code);
}
