//! CLI module for the JWT Auth API
//!
//! - `serve`: run the HTTP server (default)

pub mod serve;

use clap::{Parser, Subcommand};

/// JWT Auth API - token based authentication service
#[derive(Parser)]
#[command(name = "jwt-auth-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default mode)
    Serve(serve::ServeArgs),
}
