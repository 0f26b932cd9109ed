//! undocx CLI - WordprocessingML body conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use undocx::{
    Attachments, FileAttachment, JsonFormat, LinkAttachment, RenderFormat, RenderStats, Undocx,
    UndocxResult,
};

#[derive(Parser)]
#[command(name = "undocx")]
#[command(version)]
#[command(about = "Convert WordprocessingML document bodies to HTML, text, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document body to HTML
    Html {
        #[command(flatten)]
        load: LoadArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Prefix for image paths
        #[arg(long, value_name = "PREFIX", default_value = "")]
        image_prefix: String,

        /// Leave images out of the output
        #[arg(long)]
        no_images: bool,
    },

    /// Convert a document body to plain text
    Text {
        #[command(flatten)]
        load: LoadArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// List item marker
        #[arg(long, default_value = "-")]
        marker: char,
    },

    /// Dump the document model as JSON
    Json {
        #[command(flatten)]
        load: LoadArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document statistics
    Info {
        #[command(flatten)]
        load: LoadArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct LoadArgs {
    /// Input document.xml file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// styles.xml used to resolve class names and headings
    #[arg(long, value_name = "FILE")]
    styles: Option<PathBuf>,

    /// Close lists left open at the end of the body or a cell
    #[arg(long)]
    close_lists: bool,

    /// Do not open an item on the first non-list node after a list
    #[arg(long)]
    balanced_items: bool,

    /// Fail on malformed XML instead of recovering
    #[arg(long)]
    strict: bool,

    /// Hyperlink attachment as ID=URL (repeatable)
    #[arg(long = "link", value_name = "ID=URL", value_parser = parse_pair)]
    links: Vec<(String, String)>,

    /// File attachment as ID=PATH (repeatable)
    #[arg(long = "file", value_name = "ID=PATH", value_parser = parse_pair)]
    files: Vec<(String, String)>,
}

impl LoadArgs {
    fn builder(&self) -> Result<Undocx, Box<dyn std::error::Error>> {
        let mut builder = Undocx::new().with_attachments(self.attachments());
        if self.strict {
            builder = builder.strict();
        }
        if self.close_lists {
            builder = builder.close_trailing_lists();
        }
        if self.balanced_items {
            builder = builder.balanced_list_items();
        }
        if let Some(path) = &self.styles {
            let styles = fs::read_to_string(path)?;
            builder = builder.with_styles_xml(&styles)?;
        }
        Ok(builder)
    }

    fn attachments(&self) -> Attachments {
        let mut attachments = Attachments::new();
        for (id, target) in &self.links {
            attachments.add_link(LinkAttachment::new(id, target));
        }
        for (id, path) in &self.files {
            attachments.add_file(FileAttachment::new(id, path));
        }
        attachments
    }

    fn load(&self, builder: Undocx) -> Result<UndocxResult, Box<dyn std::error::Error>> {
        log::info!("Loading {}", self.input.display());
        Ok(builder.load(&self.input)?)
    }
}

fn parse_pair(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((id, target)) if !id.is_empty() => Ok((id.to_string(), target.to_string())),
        _ => Err(format!("expected ID=VALUE, got '{}'", value)),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Html {
            load,
            output,
            image_prefix,
            no_images,
        } => cmd_html(&load, output.as_deref(), image_prefix, no_images),
        Commands::Text {
            load,
            output,
            marker,
        } => cmd_text(&load, output.as_deref(), marker),
        Commands::Json {
            load,
            output,
            compact,
        } => cmd_json(&load, output.as_deref(), compact),
        Commands::Info { load } => cmd_info(&load),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_html(
    load: &LoadArgs,
    output: Option<&Path>,
    image_prefix: String,
    no_images: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = load
        .builder()?
        .with_image_prefix(image_prefix)
        .with_images(!no_images);
    let html = load.load(builder)?.to_html()?;
    write_output(output, &html)
}

fn cmd_text(
    load: &LoadArgs,
    output: Option<&Path>,
    marker: char,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = load.builder()?.with_list_marker(marker);
    let text = load.load(builder)?.to_text()?;
    write_output(output, &text)
}

fn cmd_json(
    load: &LoadArgs,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = load.load(load.builder()?)?.to_json(format)?;
    write_output(output, &json)
}

fn cmd_info(load: &LoadArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = load.load(load.builder()?)?;
    let doc = result.document();
    let stats = result.render_with_stats(RenderFormat::Text)?.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), load.input.display());
    println!("{}: {}", "Top-level nodes".bold(), doc.root().len());
    println!("{}: {}", "Total nodes".bold(), doc.nodes().len());
    println!("{}: {}", "XML nodes".bold(), doc.xml().node_count());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    print_stats(&stats);

    if log::log_enabled!(log::Level::Debug) {
        log::debug!("{}", serde_json::to_string(&stats)?);
    }

    Ok(())
}

fn print_stats(stats: &RenderStats) {
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
}

fn cmd_version() {
    println!("{} {}", "undocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("WordprocessingML body conversion tool");
    println!();
    println!("License: MIT");
}
