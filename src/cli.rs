use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ytsum", about = "YouTube caption summarization service", version)]
pub struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on (overrides the PORT env var and the config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to config file (defaults to ~/.config/ytsum/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
