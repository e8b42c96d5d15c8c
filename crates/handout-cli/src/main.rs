mod logger;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_async_runtime::{HandoutCommand, HandoutUpdate, LayoutPlan, SlideImage, spawn_worker};
use pdf_handout::{LayoutConfig, Margins, Orientation, PaperSize};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::logger::ConsoleLogger;

/// Height of generated placeholder slides in pixels
const PLACEHOLDER_HEIGHT_PX: u32 = 540;

#[derive(Parser)]
#[command(name = "handout", about = "Slide handout layout and indexing", version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the layout plan for a deck
    Plan {
        #[command(flatten)]
        slides: SlideArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// List the locator label of every slide
        #[arg(long)]
        positions: bool,

        /// Print the locator label of one slide (1-based)
        #[arg(long)]
        locate: Option<usize>,
    },

    /// Compose the slides into a handout PDF
    Render {
        #[command(flatten)]
        slides: SlideArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print instructions for writing a markdown index of the handout
    Prompt {
        #[command(flatten)]
        slides: SlideArgs,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Put a markdown index in front of a rendered handout
    Index {
        /// Markdown index file
        #[arg(short, long)]
        markup: PathBuf,

        /// Handout PDF produced by `render`
        #[arg(short, long)]
        content: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Font file for non-Latin text (tried before system fonts)
        #[arg(long)]
        font: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SlideArgs {
    /// Directory of exported slide images (Slide1.png, Slide2.png, ...)
    #[arg(short, long, conflicts_with = "placeholders")]
    slides: Option<PathBuf>,

    /// Use this many blank placeholder slides instead of a directory
    #[arg(long)]
    placeholders: Option<usize>,

    /// Width/height ratio of placeholder slides
    #[arg(long, default_value = "1.7777778")]
    aspect: f32,
}

impl SlideArgs {
    /// Placeholder aspect ratio, rejected unless positive and finite
    fn placeholder_aspect(&self) -> Result<f32> {
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            bail!("--aspect must be a positive number");
        }
        Ok(self.aspect)
    }
}

#[derive(Args)]
struct LayoutArgs {
    /// JSON layout config to start from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Slides per row
    #[arg(long)]
    columns: Option<usize>,

    /// Paper size
    #[arg(long, value_enum, conflicts_with = "page_size")]
    paper: Option<PaperArg>,

    /// Custom paper size in millimeters, e.g. 300x200
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<PageSizeArg>,

    /// Paper orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Uniform page margin in mm
    #[arg(long)]
    margin: Option<f32>,

    /// Horizontal gap between slides in mm
    #[arg(long)]
    h_spacing: Option<f32>,

    /// Vertical gap between slides in mm
    #[arg(long)]
    v_spacing: Option<f32>,

    /// Do not stamp page-position labels under slides
    #[arg(long)]
    no_locator: bool,

    /// Do not stamp page numbers
    #[arg(long)]
    no_page_number: bool,

    /// Write the effective layout config to this JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, Debug)]
struct PageSizeArg {
    width_mm: f32,
    height_mm: f32,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

fn parse_page_size(s: &str) -> std::result::Result<PageSizeArg, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid size '{v}': {e}"))
    };
    Ok(PageSizeArg {
        width_mm: parse(w)?,
        height_mm: parse(h)?,
    })
}

impl LayoutArgs {
    /// Start from the config file (or defaults) and apply flag overrides
    async fn resolve(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => LayoutConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(paper) = self.paper {
            config.paper_size = paper.into();
        }
        if let Some(size) = self.page_size {
            config.paper_size = PaperSize::Custom {
                width_mm: size.width_mm,
                height_mm: size.height_mm,
            };
        }
        if let Some(orientation) = self.orientation {
            config.orientation = orientation.into();
        }
        if let Some(margin) = self.margin {
            config.margins = Margins::uniform(margin);
        }
        if let Some(h) = self.h_spacing {
            config.h_spacing_mm = h;
        }
        if let Some(v) = self.v_spacing {
            config.v_spacing_mm = v;
        }
        if self.no_locator {
            config.show_item_locator = false;
        }
        if self.no_page_number {
            config.show_page_number = false;
        }

        config.validate()?;

        if let Some(path) = &self.save_config {
            config
                .save(path)
                .await
                .with_context(|| format!("Failed to save config {}", path.display()))?;
            log::info!("Saved layout config to {}", path.display());
        }

        Ok(config)
    }
}

/// Channel pair to the background worker
struct Session {
    commands: mpsc::UnboundedSender<HandoutCommand>,
    updates: mpsc::UnboundedReceiver<HandoutUpdate>,
}

impl Session {
    fn start() -> Self {
        let (commands, updates, _handle) = spawn_worker();
        Self { commands, updates }
    }

    /// Send one command and wait for its outcome, printing progress
    async fn request(&mut self, cmd: HandoutCommand) -> Result<HandoutUpdate> {
        self.commands
            .send(cmd)
            .map_err(|_| anyhow!("Worker is not running"))?;

        while let Some(update) = self.updates.recv().await {
            match update {
                HandoutUpdate::Progress {
                    stage,
                    current,
                    total,
                    message,
                } => {
                    log::info!("[{stage}] {current}/{total} {message}");
                }
                HandoutUpdate::Error { stage, message } => {
                    bail!("{stage} failed: {message}");
                }
                other => return Ok(other),
            }
        }
        bail!("Worker stopped unexpectedly")
    }

    async fn slides(&mut self, args: &SlideArgs) -> Result<Vec<SlideImage>> {
        match (&args.slides, args.placeholders) {
            (Some(dir), _) => match self
                .request(HandoutCommand::LoadSlides { dir: dir.clone() })
                .await?
            {
                HandoutUpdate::SlidesLoaded { slides } => Ok(slides),
                other => bail!("Unexpected worker reply: {other:?}"),
            },
            (None, Some(count)) => {
                let aspect = args.placeholder_aspect()?;
                let width = (PLACEHOLDER_HEIGHT_PX as f32 * aspect).round().max(1.0) as u32;
                (0..count)
                    .map(|_| {
                        SlideImage::placeholder(width, PLACEHOLDER_HEIGHT_PX).map_err(Into::into)
                    })
                    .collect()
            }
            (None, None) => bail!("Either --slides or --placeholders is required"),
        }
    }

    /// Slide count and reference aspect ratio, without decoding anything
    async fn deck_shape(&mut self, args: &SlideArgs) -> Result<(usize, f32)> {
        if let (None, Some(count)) = (&args.slides, args.placeholders) {
            return Ok((count, args.placeholder_aspect()?));
        }
        let slides = self.slides(args).await?;
        let aspect = slides.first().map(SlideImage::aspect_ratio).unwrap_or(0.0);
        Ok((slides.len(), aspect))
    }

    async fn plan(&mut self, args: &SlideArgs, config: LayoutConfig) -> Result<LayoutPlan> {
        let (item_count, aspect_ratio) = self.deck_shape(args).await?;
        match self
            .request(HandoutCommand::CalculateLayout {
                item_count,
                aspect_ratio,
                config,
            })
            .await?
        {
            HandoutUpdate::LayoutCalculated { plan } => Ok(plan),
            other => bail!("Unexpected worker reply: {other:?}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    ConsoleLogger::new(ConsoleLogger::level_for(cli.verbose, cli.quiet))
        .init()
        .context("Failed to install logger")?;

    let mut session = Session::start();

    match cli.command {
        Commands::Plan {
            slides,
            layout,
            positions,
            locate,
        } => {
            let config = layout.resolve().await?;
            let plan = session.plan(&slides, config).await?;
            println!("{}", plan.summary());
            if plan.is_degenerate() {
                println!("Warning: the margins and spacing leave no room for slides");
            }

            if let Some(n) = locate {
                match pdf_handout::locate(n, plan.items_per_page) {
                    Some(label) if n <= plan.item_count => println!("Slide {n}: {label}"),
                    _ => bail!("Slide {n} is not in this deck of {}", plan.item_count),
                }
            }

            if positions {
                let mut out = std::io::stdout().lock();
                for (index, pos) in plan.positions().enumerate() {
                    writeln!(out, "{:>4}  {}", index + 1, pos.locator())?;
                }
            }
        }

        Commands::Render {
            slides,
            layout,
            output,
        } => {
            let config = layout.resolve().await?;
            let slides = session.slides(&slides).await?;
            let count = slides.len();

            match session
                .request(HandoutCommand::Render {
                    slides,
                    config,
                    output_path: output,
                })
                .await?
            {
                HandoutUpdate::RenderComplete { path, report } => {
                    if report.pages_written == 0 {
                        println!("No slides to render");
                    } else {
                        println!(
                            "Rendered {} of {} slides on {} pages → {}",
                            report.items_placed,
                            count,
                            report.pages_written,
                            path.display()
                        );
                    }
                    if report.skipped > 0 {
                        println!("Skipped {} slides that could not be embedded", report.skipped);
                    }
                }
                other => bail!("Unexpected worker reply: {other:?}"),
            }
        }

        Commands::Prompt { slides, layout } => {
            let config = layout.resolve().await?;
            let (item_count, aspect_ratio) = session.deck_shape(&slides).await?;

            match session
                .request(HandoutCommand::IndexPrompt {
                    item_count,
                    aspect_ratio,
                    config,
                })
                .await?
            {
                HandoutUpdate::IndexPromptReady { prompt } => println!("{prompt}"),
                other => bail!("Unexpected worker reply: {other:?}"),
            }
        }

        Commands::Index {
            markup,
            content,
            output,
            font,
        } => {
            let markup_text = tokio::fs::read_to_string(&markup)
                .await
                .with_context(|| format!("Failed to read {}", markup.display()))?;

            match session
                .request(HandoutCommand::BuildIndexed {
                    markup: markup_text,
                    content_path: content,
                    output_path: output,
                    font_path: font,
                })
                .await?
            {
                HandoutUpdate::IndexedComplete {
                    path,
                    index_pages,
                    total_pages,
                } => {
                    println!(
                        "Added {} index page(s), {} pages total → {}",
                        index_pages,
                        total_pages,
                        path.display()
                    );
                }
                other => bail!("Unexpected worker reply: {other:?}"),
            }
        }
    }

    Ok(())
}
