//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port, and data directory before
//! starting the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::{DEFAULT_BIND_ADDR, DEFAULT_PORT};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks the user for a bind address and port, sets the corresponding
/// environment variables (`BIND_ADDR`, `PORT`), asks which data directory
/// to load (defaulting to `data_dir`), and delegates to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(data_dir: PathBuf) -> std::io::Result<()> {
    println!("SafeCity Dashboard Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(DEFAULT_BIND_ADDR.to_string())
        .interact_text()
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let port_str: String = Input::new()
        .with_prompt("Port")
        .default(DEFAULT_PORT.to_string())
        .validate_with(|input: &String| {
            input
                .parse::<u16>()
                .map(|_| ())
                .map_err(|_| "Port must be a number between 0 and 65535")
        })
        .interact_text()
        .unwrap_or_else(|_| DEFAULT_PORT.to_string());

    let default_dir = data_dir.display().to_string();
    let data_dir: PathBuf = Input::<String>::new()
        .with_prompt("Data directory")
        .default(default_dir)
        .interact_text()
        .map_or(data_dir, PathBuf::from);

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", &port_str);
    }

    if !Confirm::new()
        .with_prompt(format!(
            "Start server on {bind_addr}:{port_str} with data from {}?",
            data_dir.display()
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(&data_dir).await
}
