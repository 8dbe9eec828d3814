use std::fs::File;
use std::io::{self, BufReader, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use cuecraft::token::load_tokens_json;
use cuecraft::{OutputType, SegmentationOpts, write_subtitles};

#[derive(Parser, Debug)]
#[command(name = "cuecraft")]
#[command(about = "Turn a word-level transcript (JSON) into subtitles")]
struct Params {
    /// Transcript JSON: an array of `{text, start, end}` words (ms), or an object with `words`.
    /// Use `-` for stdin.
    #[arg(short = 'i', long = "input", default_value = "-")]
    input: String,

    /// Where to write subtitles. Use `-` for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    #[arg(
        short = 't',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Srt
    )]
    output_type: OutputType,

    /// JSON file with segmentation options; missing fields use defaults.
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    #[arg(long = "max-chars-per-line")]
    max_chars_per_line: Option<usize>,

    #[arg(long = "max-lines")]
    max_lines: Option<usize>,

    #[arg(long = "max-chars-per-cue")]
    max_chars_per_cue: Option<usize>,

    #[arg(long = "max-cue-duration-ms")]
    max_cue_duration_ms: Option<u64>,

    #[arg(long = "min-cue-duration-ms")]
    min_cue_duration_ms: Option<u64>,

    #[arg(long = "min-gap-ms")]
    min_gap_ms: Option<u64>,

    #[arg(long = "silence-threshold-ms")]
    silence_threshold_ms: Option<u64>,

    #[arg(long = "sentence-break-min-duration-ms")]
    sentence_break_min_duration_ms: Option<u64>,

    #[arg(long = "sentence-break-min-chars")]
    sentence_break_min_chars: Option<usize>,

    #[arg(long = "line-split-tolerance-chars")]
    line_split_tolerance_chars: Option<usize>,
}

fn main() {
    cuecraft::init_logging();

    if let Err(err) = run() {
        error!(error = format!("{err:#}"), "cuecraft failed");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let params = Params::parse();
    let opts = build_opts(&params)?;

    let tokens = {
        let reader = open_input(&params.input)?;
        load_tokens_json(reader)
            .with_context(|| format!("failed to read transcript from '{}'", params.input))?
    };

    // Encode fully before touching the output so a failure never truncates an existing file.
    let mut encoded = Vec::new();
    let cues = write_subtitles(&tokens, &opts, params.output_type, &mut encoded)
        .context("failed to build subtitles")?;

    let mut writer = open_output(&params.output)?;
    writer
        .write_all(&encoded)
        .and_then(|()| writer.flush())
        .with_context(|| format!("failed to write '{}'", params.output))?;

    info!(cues, output = %params.output, "done");
    Ok(())
}

/// Defaults, then the config file, then individual flags.
fn build_opts(params: &Params) -> Result<SegmentationOpts> {
    let mut opts = match &params.config {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open config '{path}'"))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse config '{path}'"))?
        }
        None => SegmentationOpts::default(),
    };

    macro_rules! override_field {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = params.$field {
                opts.$field = v;
            })*
        };
    }
    override_field!(
        max_chars_per_line,
        max_lines,
        max_chars_per_cue,
        max_cue_duration_ms,
        min_cue_duration_ms,
        min_gap_ms,
        silence_threshold_ms,
        sentence_break_min_duration_ms,
        sentence_break_min_chars,
        line_split_tolerance_chars,
    );

    opts.validate()?;
    Ok(opts)
}

fn open_input(path: &str) -> Result<Box<dyn Read>> {
    if path == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("failed to open input '{path}'"))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        return Ok(Box::new(io::stdout().lock()));
    }
    let file = File::create(path).with_context(|| format!("failed to create output '{path}'"))?;
    Ok(Box::new(file))
}
