use clap::{ArgAction, Parser};
use ffscale::config::Config;
use ffscale::scale::{Direction, Length, SizeConstraints};
use ffscale::settings::Settings;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ffscale")]
#[command(author, version, about = "A CLI wrapping ffmpeg to upscale/downscale videos")]
#[command(disable_help_flag = true)]
#[command(after_help = "<LENGTH> can be an integer (in px), or a percentage such as 50%.\n\
    The aspect ratio is kept if only one side is specified.")]
pub struct Cli {
    /// Scale by width
    #[arg(short, long, value_name = "LENGTH")]
    pub width: Option<Length>,

    /// Scale by height
    #[arg(short = 'h', long, value_name = "LENGTH")]
    pub height: Option<Length>,

    /// Scale by the short side
    #[arg(short, long, value_name = "LENGTH")]
    pub short_side: Option<Length>,

    /// Scale by the long side
    #[arg(short, long, value_name = "LENGTH")]
    pub long_side: Option<Length>,

    /// Python formatted string for the output file name; 'dir' always ends
    /// with a slash [default: {dir}{name}_ffscale{ext}]
    #[arg(short, long, value_name = "TEMPLATE")]
    pub output: Option<String>,

    /// Overwrite the destination file
    #[arg(long)]
    pub overwrite: bool,

    /// Allowed scaling direction [default: down]
    #[arg(long, value_enum)]
    pub direction: Option<Direction>,

    /// Echo probe output and ffmpeg invocations
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Glob patterns of files to convert
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,
}

impl Cli {
    /// Layer the command line over the config file's settings.
    pub fn into_settings(self, config: &Config) -> Settings {
        let mut settings = Settings::from_config(config);

        settings.patterns = self.files;
        settings.constraints = SizeConstraints {
            width: self.width,
            height: self.height,
            short_side: self.short_side,
            long_side: self.long_side,
        };
        if let Some(output) = self.output {
            settings.output_template = output;
        }
        if let Some(direction) = self.direction {
            settings.direction = direction;
        }
        settings.overwrite |= self.overwrite;
        settings.verbose = self.verbose;

        settings
    }
}
