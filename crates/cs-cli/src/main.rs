//! comment-service - comment API over a document store
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a config template
//! comment-service init
//!
//! # Check the setup
//! comment-service doctor
//!
//! # Run the API
//! AUTH_TOKEN_SECRET=... comment-service serve
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
