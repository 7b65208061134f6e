use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use clipscribe_core::media::infrastructure::ffmpeg_duration_probe::FfmpegDurationProbe;
use clipscribe_core::pipeline::transcribe_clip_use_case::{
    prepare_clip, TranscribeClipUseCase,
};
use clipscribe_core::shared::constants::{BACKEND_URL_ENV, DEFAULT_REQUEST_TIMEOUT_SECS};
use clipscribe_core::shared::settings::Settings;
use clipscribe_core::timing::domain::clock_time::ClockTime;
use clipscribe_core::timing::domain::time_range::{EndAdvancePolicy, Endpoint, TimeRange};
use clipscribe_core::transcription::infrastructure::http_transcription_client::HttpTranscriptionClient;

/// Transcribe a time range of an audio file with a remote speech-to-text backend.
#[derive(Parser)]
#[command(name = "clipscribe")]
struct Cli {
    /// Input audio file.
    input: PathBuf,

    /// Clip start as HH:MM:SS (default 00:00:00).
    #[arg(long, value_parser = parse_clock_time)]
    start: Option<ClockTime>,

    /// Clip end as HH:MM:SS (default 00:10:00, or start + 10 minutes).
    #[arg(long, value_parser = parse_clock_time)]
    end: Option<ClockTime>,

    /// Transcription backend base URL.
    #[arg(long, env = BACKEND_URL_ENV)]
    backend_url: Option<String>,

    /// Where the end goes when the start passes it before the duration is
    /// known: clamp-to-zero or keep-window.
    #[arg(long, value_parser = parse_end_advance)]
    end_advance: Option<EndAdvancePolicy>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout: u64,

    /// Print the selectable hour/minute/second options and exit.
    #[arg(long)]
    show_options: bool,

    /// Print the form fields that would be sent and exit.
    #[arg(long)]
    dry_run: bool,

    /// Persist --backend-url and --end-advance as defaults.
    #[arg(long)]
    save_settings: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mut settings = Settings::load();
    let policy = cli.end_advance.unwrap_or(settings.end_advance);
    let backend_url = cli.backend_url.clone().or_else(|| settings.backend_url.clone());

    if cli.save_settings {
        settings.end_advance = policy;
        settings.backend_url = backend_url.clone();
        let path = settings.save()?;
        log::info!("Settings saved to {}", path.display());
    }

    if cli.show_options || cli.dry_run {
        let (_file, range) =
            prepare_clip(&FfmpegDurationProbe, &cli.input, policy, cli.start, cli.end)?;
        if cli.show_options {
            print_options(&range);
        }
        if cli.dry_run {
            let (start, end) = range.compact_fields();
            println!("startTime={start}");
            println!("endTime={end}");
        }
        return Ok(());
    }

    let backend_url = backend_url.ok_or_else(|| {
        format!(
            "No backend URL: pass --backend-url, set {BACKEND_URL_ENV}, \
             or save one with --save-settings"
        )
    })?;
    let client = HttpTranscriptionClient::new(&backend_url)?
        .with_timeout(Duration::from_secs(cli.timeout));

    let use_case =
        TranscribeClipUseCase::new(Box::new(FfmpegDurationProbe), Box::new(client), policy);
    eprintln!("Uploading & transcribing...");
    let result = use_case.execute(&cli.input, cli.start, cli.end)?;
    log::info!("Transcribed {} to {}", result.start, result.end);
    println!("{}", result.text);
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.timeout == 0 {
        return Err("Timeout must be at least 1 second".into());
    }
    Ok(())
}

fn parse_clock_time(value: &str) -> Result<ClockTime, String> {
    value.parse::<ClockTime>().map_err(|e| e.to_string())
}

fn parse_end_advance(value: &str) -> Result<EndAdvancePolicy, String> {
    EndAdvancePolicy::ALL
        .iter()
        .copied()
        .find(|policy| policy.to_string() == value)
        .ok_or_else(|| {
            format!("End advance must be 'clamp-to-zero' or 'keep-window', got '{value}'")
        })
}

fn print_options(range: &TimeRange) {
    println!("Duration: {:?}", range.bound());
    for endpoint in [Endpoint::Start, Endpoint::End] {
        println!(
            "{endpoint} {} ({:?})",
            range.value(endpoint),
            range.state(endpoint)
        );
        let options = range.options(endpoint);
        print_field("  hours", &options.hour_labels());
        print_field("  minutes", &options.minute_labels());
        print_field("  seconds", &options.second_labels());
    }
}

fn print_field(name: &str, labels: &[String]) {
    match (labels.first(), labels.last()) {
        (Some(first), Some(last)) if labels.len() > 1 => println!("{name}: {first}..{last}"),
        (Some(only), _) => println!("{name}: {only}"),
        _ => println!("{name}: -"),
    }
}
