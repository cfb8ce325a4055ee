use clap::Parser;
use gemini_stream::cli::{run, Args};

fn init_logger(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let args = Args::parse();
    init_logger(args.debug);

    run(args).await?;
    Ok(())
}
