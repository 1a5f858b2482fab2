//! `progviz demo`: count up under a progress bar

use crate::config::{AppConfig, Overrides};
use crate::error::CliResult;
use crate::terminal;
use clap::Args;
use progviz_core::{ColorName, ProgressVisualizer};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    /// Count from 0 up to and including this number
    #[arg(short, long, default_value_t = 10_000)]
    pub count: usize,

    /// Print every number divisible by this
    #[arg(short, long, default_value_t = 1_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub every: u64,

    /// Sleep after each number, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Label printed before the bar
    #[arg(long)]
    pub description: Option<String>,

    /// Fill character (exactly one character)
    #[arg(long)]
    pub fill: Option<String>,

    /// Hide the ETA / elapsed field
    #[arg(long)]
    pub no_time: bool,

    /// Minimum time between redraws, in milliseconds
    #[arg(long)]
    pub throttle_ms: Option<u64>,

    /// Bar width in cells
    #[arg(long)]
    pub bar_length: Option<usize>,

    /// Bar and text color once complete
    #[arg(long)]
    pub done_color: Option<ColorName>,

    /// Bar color while running
    #[arg(long)]
    pub progress_color: Option<ColorName>,
}

impl DemoArgs {
    /// Values given on the command line, layered over the configuration
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bar_length: self.bar_length,
            done_color: self.done_color,
            progress_color: self.progress_color,
            description: self.description.clone(),
            track_time: self.no_time.then_some(false),
            throttle_ms: self.throttle_ms,
        }
    }
}

/// Run the demo with `config` as the base layer
pub fn run(mut config: AppConfig, args: &DemoArgs) -> CliResult<()> {
    config.apply_cli_overrides(args.overrides());

    let mut options = config.visualize_options();
    if let Some(fill) = &args.fill {
        options = options.with_fill(fill);
    }
    // reject bad options even when the bar ends up skipped
    config.bar.validate()?;
    options.fill_char(config.bar.fill_char)?;

    let numbers = 0..args.count.saturating_add(1);
    let mut out = io::stdout();

    if terminal::should_draw_progress() {
        let mut visualizer = ProgressVisualizer::stdout(config.bar)?;
        for number in visualizer.visualize(numbers, &options)? {
            report(&mut out, number?, args)?;
        }
    } else {
        log::info!("stdout is not an interactive ANSI terminal, printing without a progress bar");
        for number in numbers {
            report(&mut out, number, args)?;
        }
    }

    writeln!(out, "Done!")?;
    Ok(())
}

fn report(out: &mut impl Write, number: usize, args: &DemoArgs) -> io::Result<()> {
    if number as u64 % args.every == 0 {
        writeln!(out, "{number}")?;
    }
    if args.delay_ms > 0 {
        thread::sleep(Duration::from_millis(args.delay_ms));
    }
    Ok(())
}
