use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use moodline::kernel::controller::{effective_duration, TimelineView};
use moodline::kernel::fallback::provide_fallback;
use moodline::kernel::timeline::{self, legend, ColorToken, Filter};
use moodline::services::classifier::HttpMoodClassifier;
use moodline::services::playback::HeadlessPlayer;
use moodline::services::transcript::StaticTranscript;
use moodline::{TimelineConfig, TimelineDriver};

const BAR_WIDTH: usize = 48;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { api_url, video_id, transcript, filter, duration, click } => {
            run_timeline(api_url, video_id, transcript, filter, duration, click).await
        }
        Commands::Fallback { filter, duration } => {
            let duration = effective_duration(duration);
            let blocks = timeline::map(&provide_fallback(), duration, filter);
            print_view(&TimelineView { blocks, filter, duration, source: None });
            Ok(())
        }
    }
}

async fn run_timeline(
    api_url: Option<String>,
    video_id: Option<String>,
    transcript: Option<PathBuf>,
    filter: Filter,
    duration: Option<f64>,
    click: Option<usize>,
) -> Result<()> {
    let mut config = TimelineConfig::from_env().context("loading configuration")?;
    if let Some(api_url) = api_url {
        config.api_url = api_url;
    }
    if let Some(video_id) = video_id {
        config.video_id = video_id;
    }
    config.validate()?;
    tracing::info!(video_src = %config.video_src, api_url = %config.api_url, "starting timeline");

    let transcripts = match transcript {
        Some(path) => StaticTranscript::new(
            tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading transcript {}", path.display()))?,
        ),
        None => StaticTranscript::demo(),
    };

    let classifier = HttpMoodClassifier::new(config.request_timeout());
    let player = Arc::new(Mutex::new(HeadlessPlayer::new()));
    let (driver, handle) = TimelineDriver::new(&config, classifier, Arc::clone(&player), transcripts);
    let task = tokio::spawn(driver.run());

    let mut view = handle.view();
    handle.mount(config.video_id.clone()).await?;

    // The request timeout bounds acquisition; the margin covers fallback commit
    let deadline = config.request_timeout() + Duration::from_secs(1);
    tokio::time::timeout(deadline, view.wait_for(|v| v.source.is_some()))
        .await
        .context("timed out waiting for segments")??;

    if let Some(duration) = duration {
        handle.duration_known(duration).await?;
    }
    if filter != Filter::All {
        handle.set_filter(filter).await?;
    }
    if let Some(index) = click {
        handle.click(index).await?;
    }

    handle.shutdown().await;
    let controller = task.await?;
    print_view(&controller.view());

    if let Ok(player) = player.lock() {
        println!("playhead: {:.2}s (playing: {})", player.position, player.playing);
    }
    tracing::info!(snapshot = ?controller.telemetry.snapshot(), "telemetry");
    Ok(())
}

fn print_view(view: &TimelineView) {
    let mut bar = vec!['.'; BAR_WIDTH];
    for block in &view.blocks {
        let start = (block.left_percent / 100.0 * BAR_WIDTH as f64).floor().max(0.0) as usize;
        let end = ((block.left_percent + block.width_percent) / 100.0 * BAR_WIDTH as f64).ceil() as usize;
        // The bar container clips overflow; blocks themselves stay unclamped
        for cell in bar.iter_mut().take(end.min(BAR_WIDTH)).skip(start) {
            *cell = glyph(block.color);
        }
    }

    let source = view.source.map(|s| format!("{:?}", s)).unwrap_or_else(|| "local".into());
    println!("[{}] filter={} duration={}s source={}", bar.iter().collect::<String>(), view.filter, view.duration, source);
    for (i, block) in view.blocks.iter().enumerate() {
        println!(
            "  #{} {:>6.2}% +{:>6.2}%  {}  {}  -> seek {}s",
            i, block.left_percent, block.width_percent, block.color.hex(), block.label, block.seek_target
        );
    }
    let keys: Vec<String> = legend().iter().map(|(mood, color)| format!("{}={}", glyph(*color), mood)).collect();
    println!("  legend: {}", keys.join(" "));
}

fn glyph(color: ColorToken) -> char {
    match color {
        ColorToken::Red => '#',
        ColorToken::Blue => '~',
        ColorToken::Amber => '=',
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Mood timeline for a video", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Acquire moods from the classification service and drive the timeline.
    Run {
        /// Base URL of the classification service.
        #[arg(long, env = "MOODLINE_API_URL")]
        api_url: Option<String>,
        #[arg(long)]
        video_id: Option<String>,
        /// Transcript file to classify. Defaults to the built-in demo transcript.
        #[arg(short, long)]
        transcript: Option<PathBuf>,
        #[arg(short, long, default_value = "all")]
        filter: Filter,
        /// Video duration in seconds, as the player would report it.
        #[arg(short, long)]
        duration: Option<f64>,
        /// Click the block at this index after rendering.
        #[arg(long)]
        click: Option<usize>,
    },
    /// Render the offline fallback timeline.
    Fallback {
        #[arg(short, long, default_value = "all")]
        filter: Filter,
        #[arg(short, long)]
        duration: Option<f64>,
    },
}
