mod logger;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use logger::StderrLogger;
use pdf_booklet::{BookletOptions, PageCount, SheetGrid, SlotPlan, SlotSequence};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfbook", about = "Duplex booklet imposition", version)]
struct Cli {
    /// More log output (repeat for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a printable booklet from a PDF
    Make {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file
        output: PathBuf,

        /// Load options from a JSON file before applying flags
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Also save the intermediate book-order spreads
        #[arg(long)]
        book_output: Option<PathBuf>,

        /// Margin at the spine, in points
        #[arg(long)]
        inner_margin: Option<f32>,

        /// Margin at the outer edge, in points
        #[arg(long)]
        outer_margin: Option<f32>,

        /// Margin above each page, in points
        #[arg(long)]
        top_margin: Option<f32>,

        /// Margin below each page, in points
        #[arg(long)]
        bottom_margin: Option<f32>,

        /// Keep source pages at their original size
        #[arg(long)]
        no_crop: bool,

        /// Space left around cropped content, in points
        #[arg(long)]
        crop_padding: Option<f32>,

        /// Turn inside spreads for printers that flip on the long edge
        #[arg(long)]
        long_edge: bool,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Output orientation
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Grid columns per sheet
        #[arg(long)]
        cols: Option<usize>,

        /// Grid rows per sheet
        #[arg(long)]
        rows: Option<usize>,

        /// Do not outline cells
        #[arg(long)]
        no_frame: bool,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Print the slot sequences and sheet order for a book page count
    Plan {
        /// Book-ordered page count
        #[arg(allow_hyphen_values = true)]
        pages: String,

        /// Grid columns per sheet
        #[arg(long, default_value = "2")]
        cols: usize,

        /// Grid rows per sheet
        #[arg(long, default_value = "4")]
        rows: usize,
    },
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

impl From<PaperArg> for pdf_booklet::PaperSize {
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

impl From<OrientationArg> for pdf_booklet::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

/// Flags given on the command line, applied over loaded options
struct Overrides {
    inner_margin: Option<f32>,
    outer_margin: Option<f32>,
    top_margin: Option<f32>,
    bottom_margin: Option<f32>,
    no_crop: bool,
    crop_padding: Option<f32>,
    long_edge: bool,
    paper: Option<PaperArg>,
    orientation: Option<OrientationArg>,
    cols: Option<usize>,
    rows: Option<usize>,
    no_frame: bool,
}

impl Overrides {
    fn apply(self, options: &mut BookletOptions) {
        let margins = &mut options.spread_margins;
        if let Some(pt) = self.inner_margin {
            margins.inner_pt = pt;
        }
        if let Some(pt) = self.outer_margin {
            margins.outer_pt = pt;
        }
        if let Some(pt) = self.top_margin {
            margins.top_pt = pt;
        }
        if let Some(pt) = self.bottom_margin {
            margins.bottom_pt = pt;
        }
        if self.no_crop {
            options.crop.enabled = false;
        }
        if let Some(pt) = self.crop_padding {
            options.crop.padding_pt = pt;
        }
        if self.long_edge {
            options.short_edge = false;
        }
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(cols) = self.cols {
            options.grid.cols = cols;
        }
        if let Some(rows) = self.rows {
            options.grid.rows = rows;
        }
        if self.no_frame {
            options.frame = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    StderrLogger::new(StderrLogger::level_for(cli.verbose, cli.quiet)).init()?;

    match cli.command {
        Commands::Make {
            input,
            output,
            config,
            save_config,
            book_output,
            inner_margin,
            outer_margin,
            top_margin,
            bottom_margin,
            no_crop,
            crop_padding,
            long_edge,
            paper,
            orientation,
            cols,
            rows,
            no_frame,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => BookletOptions::load(path).await?,
                None => BookletOptions::default(),
            };
            Overrides {
                inner_margin,
                outer_margin,
                top_margin,
                bottom_margin,
                no_crop,
                crop_padding,
                long_edge,
                paper,
                orientation,
                cols,
                rows,
                no_frame,
            }
            .apply(&mut options);
            options.validate()?;

            if let Some(path) = &save_config {
                options.save(path).await?;
                log::info!("Saved options to {}", path.display());
            }

            let document = pdf_booklet::load_pdf(&input).await?;

            let stats = pdf_booklet::calculate_statistics(&document, &options)?;
            println!("Booklet Statistics:");
            println!("  Source pages: {}", stats.source_pages);
            println!("  Blank pages added: {}", stats.blank_pages_added);
            println!("  Book pages: {}", stats.book_pages);
            println!(
                "  Slots: {} front, {} back ({} blank)",
                stats.front_slots, stats.back_slots, stats.blank_slots
            );
            println!(
                "  Sheets: {} front, {} back",
                stats.front_sheets, stats.back_sheets
            );
            println!("  Output pages: {}", stats.output_pages);

            if stats_only {
                return Ok(());
            }

            let booklet = pdf_booklet::generate_booklet(&document, &options).await?;
            if let Some(path) = &book_output {
                pdf_booklet::save_pdf(booklet.book, path).await?;
                println!("Book order → {}", path.display());
            }
            pdf_booklet::save_pdf(booklet.document, &output).await?;
            println!("Booklet → {}", output.display());
        }

        Commands::Plan { pages, cols, rows } => {
            let page_count: PageCount = pages.parse()?;
            let plan = SlotPlan::new(page_count.get(), SheetGrid::new(cols, rows))?;

            print_sequence("Front", plan.front(), plan.grid());
            print_sequence("Back", plan.back(), plan.grid());

            let order = pdf_booklet::final_order(plan.front_sheet_count(), plan.back_sheet_count())?;
            let labels: Vec<String> = order.iter().map(ToString::to_string).collect();
            println!("Order: {}", labels.join(" "));
        }
    }

    Ok(())
}

fn print_sequence(label: &str, sequence: &SlotSequence, grid: SheetGrid) {
    println!("{} ({} slots): {}", label, sequence.len(), sequence);
    for (index, sheet) in sequence.sheets(grid).enumerate() {
        let slots: Vec<String> = sheet.iter().map(ToString::to_string).collect();
        println!("  sheet {}: {}", index + 1, slots.join(","));
    }
}
