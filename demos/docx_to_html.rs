//! Convert a Word document to paginated HTML.
//!
//! Run with:
//! ```sh
//! cargo run --example docx_to_html -- report.docx -o report.html --merge-cells
//! ```

use clap::Parser;
use longan::html::HtmlOptions;
use longan::ooxml::docx::ParseOptions;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Convert a .docx file to paginated HTML")]
struct Args {
    /// Input .docx file
    input: PathBuf,

    /// Output HTML file; defaults to the input name with an .html extension.
    /// Use `-` for stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit colspan/rowspan for merged table cells
    #[arg(long)]
    merge_cells: bool,

    /// Link image part names instead of embedding data URLs
    #[arg(long)]
    no_embed_images: bool,

    /// Expose theme colors as CSS custom properties
    #[arg(long)]
    theme_variables: bool,

    /// Parse parts one after another on the calling thread
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let bytes = std::fs::read(&args.input)?;
    let parse = ParseOptions::new()
        .with_media(!args.no_embed_images)
        .with_parallel(!args.sequential);
    let render = HtmlOptions::new()
        .with_merge_cells(args.merge_cells)
        .with_embed_images(!args.no_embed_images)
        .with_theme_variables(args.theme_variables);

    let conversion = longan::convert_with_options(&bytes, &parse, &render)?;
    for diagnostic in &conversion.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    let metadata = conversion.document.metadata();
    if let Some(title) = metadata.title.as_deref() {
        eprintln!("title: {title}");
    }

    match args.output {
        Some(path) if path.as_os_str() == "-" => println!("{}", conversion.html),
        output => {
            let path = output.unwrap_or_else(|| args.input.with_extension("html"));
            std::fs::write(&path, &conversion.html)?;
            eprintln!(
                "wrote {} ({} blocks, {} media parts)",
                path.display(),
                conversion.document.document().blocks().len(),
                conversion.document.media().len()
            );
        },
    }
    Ok(())
}
