// CLI module for prompt2image

use clap::Parser;

/// prompt2image - Resilient image-generation gateway
#[derive(Parser, Debug)]
#[command(name = "prompt2image", version, about, long_about = None)]
pub struct Args {
    /// Probe upstream API connectivity, then exit
    #[arg(long)]
    pub check: bool,
}
