use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::store;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Flow network to read (`.max`, `.json` or `.bin`).
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Destination; the extension selects the output format.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &ConvertArgs) -> Result<(), Box<dyn Error>> {
    let network = store::load_flow(&args.input)?;
    store::save_flow(&network, &args.out)?;
    tracing::info!(
        from = %args.input.display(),
        to = %args.out.display(),
        vertices = network.num_vertices(),
        edges = network.num_edges(),
        "converted flow network"
    );
    Ok(())
}
