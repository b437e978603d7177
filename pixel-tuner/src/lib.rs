//! Live color adjustment of a single image.
//!
//! Loads a source image, then applies filter events read from stdin or a
//! script file. Every accepted event recomputes the whole image and writes it
//! to the output PNG.
//!
//! # Tasks
//! - Logger and configuration setup
//! - Background image decoding behind a readiness gate
//! - Input event loop feeding the filter session

pub mod cli;
pub mod config;
pub mod logic;
pub mod ready;

use anyhow::{Context, Result};
use cli::Args;
use filter_pipeline::Session;
use logic::sink::{ConsoleLabels, PngSink};
use ready::ImageReady;
use tokio::io::BufReader;

/// Sets up a logger with timestamp, log level, file name, line number and
/// the message.
pub fn init_logger() {
    use std::io::Write;

    env_logger::builder()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

pub async fn run(args: Args) -> Result<()> {
    config::init(args.config.as_deref())?;

    let conf = args.apply(config::all());

    log::info!(
        "{} -> {} (config: {})",
        conf.image.input.display(),
        conf.image.output.display(),
        conf.config_path.display()
    );

    let ready = ImageReady::load(conf.image.input.clone());

    let mut session = Session::new(
        PngSink::new(conf.image.output.clone(), conf.image.save_every_change),
        ConsoleLabels::new(conf.display.echo_labels),
    );

    session.load_image(ready.wait().await?)?;

    let stats = match args.script {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("open script {} failed", path.display()))?;
            logic::process_events(BufReader::new(file), &mut session).await?
        }
        None => logic::process_events(BufReader::new(tokio::io::stdin()), &mut session).await?,
    };

    session.sink_mut().flush()?;

    log::info!(
        "{} accepted, {} ignored, {} frame(s) written",
        stats.accepted,
        stats.rejected,
        session.sink().written()
    );

    Ok(())
}
