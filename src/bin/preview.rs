#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use hyperdrive::config::PageConfig;

    /// Render the HyperDrive hero car in a desktop window.
    #[derive(Debug, Parser)]
    #[command(name = "hyperdrive-preview", version)]
    struct Args {
        /// JSON file overriding the page configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    }

    pub fn main() -> anyhow::Result<()> {
        let args = Args::parse();
        let config = match args.config {
            Some(path) => PageConfig::from_file(&path)?,
            None => PageConfig::default(),
        };
        hyperdrive::preview::run(config)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
