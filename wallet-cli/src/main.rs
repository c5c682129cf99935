use tracing_subscriber::EnvFilter;

mod commands;

mod opt;
pub use opt::Opt;

fn main() -> anyhow::Result<()> {
    // initialize tracing; logs go to stderr so stdout only carries balances
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    use clap::Parser;
    Opt::parse().exec()
}
