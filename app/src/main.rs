use clap::Parser;
use miterline_app::{Args, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("miterline v{}", miterline_app::VERSION);

    let report = run(&args, &mut std::io::stdout().lock())?;
    log::info!(
        "Done: {} points, {} indices drawn",
        report.point_count,
        report.draw_index_count
    );
    Ok(())
}
