use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Adjust the colors of an image from a stream of filter events
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about)]
pub struct Args {
    /// Config file path [default: platform config dir]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source image, overrides the config file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output PNG, overrides the config file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read events from this file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Do not print label changes
    #[arg(short, long)]
    pub quiet_labels: bool,
}

impl Args {
    /// Layer the command line overrides on top of the loaded config
    pub fn apply(&self, conf: Config) -> Config {
        let mut image = conf.image.clone();
        if let Some(input) = &self.input {
            image = image.with_input(input.clone());
        }
        if let Some(output) = &self.output {
            image = image.with_output(output.clone());
        }

        let display = if self.quiet_labels {
            conf.display.clone().with_echo_labels(false)
        } else {
            conf.display.clone()
        };

        conf.with_image(image).with_display(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "pixel-tuner",
            "--input",
            "a.png",
            "-o",
            "b.png",
            "--script",
            "events.txt",
            "-q",
        ]);

        assert_eq!(args.input, Some(PathBuf::from("a.png")));
        assert_eq!(args.output, Some(PathBuf::from("b.png")));
        assert_eq!(args.script, Some(PathBuf::from("events.txt")));
        assert!(args.config.is_none());
        assert!(args.quiet_labels);
    }

    #[test]
    fn test_apply_overrides() {
        let args = Args::parse_from(["pixel-tuner", "-o", "b.png", "-q"]);
        let conf = args.apply(Config::default());

        assert_eq!(conf.image.input, PathBuf::from("img/input.png"));
        assert_eq!(conf.image.output, PathBuf::from("b.png"));
        assert!(conf.image.save_every_change);
        assert!(!conf.display.echo_labels);

        let conf = Args::default().apply(conf);
        assert_eq!(conf.image.output, PathBuf::from("b.png"));
        assert!(!conf.display.echo_labels);
    }
}
