use clap::{Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "moviebox")]
#[command(about = "MovieBox movie catalogue API", long_about = None)]
pub struct Cli {
    /// Defaults to `lambda`, which is how the function runtime starts the binary
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve invocations from the AWS Lambda runtime
    Lambda,
    /// Run a local HTTP server with the same routes
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to (defaults to `server.bind_addr`)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}
