use clap::Parser;
use pixel_tuner::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    pixel_tuner::init_logger();
    pixel_tuner::run(args).await
}
