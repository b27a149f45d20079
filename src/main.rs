use clap::Parser;
use tracing_subscriber::EnvFilter;

use statcard::models::{CardKind, LayoutMode, RenderConfig, RenderRequest};
use statcard::{Config, StatsService};

#[derive(Parser, Debug)]
#[command(name = "statcard")]
#[command(version = "0.1.0")]
#[command(about = "Render GitHub contribution statistics as SVG cards")]
struct Args {
    /// GitHub username to render
    #[arg(short, long)]
    username: String,

    /// Theme (dark, light, glass, neon, github, cyberpunk)
    #[arg(short, long, default_value = "dark")]
    theme: String,

    /// Comma-separated cards (profile, repositories, commits, streak,
    /// languages, skills, trophies, unified)
    #[arg(short, long, default_value = "unified")]
    cards: String,

    /// Card arrangement (grid, row, column)
    #[arg(short, long, default_value = "grid")]
    layout: LayoutMode,

    #[arg(long)]
    primary_color: Option<String>,

    #[arg(long)]
    secondary_color: Option<String>,

    #[arg(long)]
    background_color: Option<String>,

    #[arg(long)]
    font_family: Option<String>,

    #[arg(long)]
    border_radius: Option<u32>,

    /// Shadow depth in pixels; 0 disables it
    #[arg(long)]
    shadow: Option<u32>,

    /// Skip cached statistics and documents
    #[arg(long)]
    no_cache: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,
}

impl Args {
    fn render_request(&self) -> anyhow::Result<RenderRequest> {
        let config = RenderConfig {
            username: self.username.trim().to_string(),
            theme: self.theme.clone(),
            cards: CardKind::parse_list(&self.cards)?,
            layout: self.layout,
            primary_color: self.primary_color.clone(),
            secondary_color: self.secondary_color.clone(),
            background_color: self.background_color.clone(),
            font_family: self.font_family.clone(),
            border_radius: self.border_radius,
            shadow: self.shadow,
        };
        Ok(RenderRequest {
            config,
            bypass_cache: self.no_cache,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("statcard=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;
    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set, commits and streaks will be unavailable");
    }

    let service = StatsService::from_config(&config)?;
    let request = args.render_request()?;

    tracing::info!(
        "Rendering {} card(s) for {}",
        request.config.cards.len(),
        request.config.username
    );
    let document = service.render(&request).await;

    if let Some(ref path) = args.output {
        std::fs::write(path, document.svg.as_bytes())?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", document.svg);
    }

    if !document.is_success() {
        anyhow::bail!("request failed with HTTP {}", document.status);
    }
    Ok(())
}
