//! CLI tool for converting PowerPoint files into styled HTML.

use anyhow::{Context, Result};
use clap::Parser;
use ppt2html_core::{Converter, ConverterConfig, Error, JsonFormat, ListMode};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Convert PowerPoint files into business-themed HTML and template records.
#[derive(Parser, Debug)]
#[command(name = "ppt2html")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file(s) (.pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print HTML to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Render lines starting with "-" or "•" as list items
    #[arg(short, long)]
    list_items: bool,

    /// Also write a JSON template record next to the HTML
    #[arg(short, long)]
    template: bool,

    /// JSON configuration file (thresholds, keywords, theme)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Title of the generated HTML document
    #[arg(long)]
    title: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Files produced for one input.
#[derive(Debug)]
struct Outputs {
    html: String,
    template_json: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    let converter = Converter::new(config);

    let mut failures = 0usize;
    for input_path in &args.input {
        log::info!("Processing: {}", input_path.display());

        if let Err(e) = run_file(input_path, &args, &converter) {
            eprintln!("Error processing {}: {:#}", input_path.display(), e);
            failures += 1;
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Build the converter configuration from the optional file and CLI flags.
fn load_config(args: &Args) -> Result<ConverterConfig> {
    let mut config = match &args.config {
        Some(path) => ConverterConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConverterConfig::default(),
    };

    if args.list_items {
        config = config.with_list_mode(ListMode::Detect);
    }
    if let Some(title) = &args.title {
        config = config.with_document_title(title.clone());
    }

    Ok(config)
}

fn run_file(input_path: &Path, args: &Args, converter: &Converter) -> Result<()> {
    let outputs = process_file(input_path, args.template, converter)?;

    if args.print {
        print!("{}", outputs.html);
        return Ok(());
    }

    let html_path = get_output_path(input_path, args.output.as_ref(), "html")?;
    write_output(&html_path, &outputs.html)?;
    log::info!("Written to: {}", html_path.display());

    if let Some(json) = outputs.template_json {
        let json_path = get_output_path(input_path, args.output.as_ref(), "json")?;
        write_output(&json_path, &json)?;
        log::info!("Template written to: {}", json_path.display());
    }

    Ok(())
}

/// Convert a single PowerPoint file.
fn process_file(input_path: &Path, with_template: bool, converter: &Converter) -> Result<Outputs> {
    let parser = ppt2html_pptx::PptxParser::new();
    let presentation = parser
        .parse_file(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    log::debug!(
        "Found {} slides, {} shapes",
        presentation.slides.len(),
        presentation.shape_count()
    );

    if !with_template {
        return Ok(Outputs {
            html: converter.to_html(&presentation),
            template_json: None,
        });
    }

    let record = converter
        .to_template(&presentation)
        .with_original_file(input_path.display().to_string());
    let template_json = record.to_json(JsonFormat::Pretty)?;

    Ok(Outputs {
        html: record.document,
        template_json: Some(template_json),
    })
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>, extension: &str) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, extension);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())
    };

    write().map_err(|source| Error::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn write_pptx(path: &Path, shapes: &str) {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        zip.start_file("ppt/_rels/presentation.xml.rels", options).unwrap();
        zip.write_all(
            br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/></Relationships>"#,
        )
        .unwrap();
        zip.start_file("ppt/slides/slide1.xml", options).unwrap();
        let slide = format!(
            r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#,
            shapes
        );
        zip.write_all(slide.as_bytes()).unwrap();
        let bytes = zip.finish().unwrap().into_inner();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_output_path_next_to_input() {
        let path = get_output_path(Path::new("decks/business_blue_01.pptx"), None, "html").unwrap();
        assert_eq!(path, PathBuf::from("decks/business_blue_01.html"));
    }

    #[test]
    fn test_output_path_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let path = get_output_path(Path::new("deck.pptx"), Some(&out), "json").unwrap();

        assert_eq!(path, out.join("deck.json"));
        assert!(out.is_dir());
    }

    #[test]
    fn test_write_output_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("deck.html");
        let err = write_output(&path, "<html></html>").unwrap_err();

        let cause = err.downcast_ref::<Error>().unwrap();
        assert!(matches!(cause, Error::OutputWriteFailure { .. }));
    }

    #[test]
    fn test_process_file_with_template() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("business_blue_01.pptx");
        write_pptx(
            &input,
            "<p:sp><p:txBody><a:p><a:r><a:t>会议标题</a:t></a:r></a:p></p:txBody></p:sp><p:pic><p:blipFill/></p:pic>",
        );

        let outputs = process_file(&input, true, &Converter::default()).unwrap();

        assert!(outputs.html.contains("<div class=\"slide\" id=\"slide-1\">"));
        assert!(outputs.html.contains("<h1>会议标题</h1>"));
        assert!(outputs.html.contains("[Image: Please add image here]"));

        let json = outputs.template_json.unwrap();
        assert!(json.contains("\"template_name\": \"business_blue_01\""));
        assert!(json.contains("\"original_file\""));
    }

    #[test]
    fn test_process_missing_file() {
        let err = process_file(Path::new("/nonexistent/deck.pptx"), false, &Converter::default())
            .unwrap_err();
        let cause = err.downcast_ref::<Error>().unwrap();
        assert!(matches!(cause, Error::InputNotFound(_)));
    }

    #[test]
    fn test_process_non_presentation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "plain text, not a deck").unwrap();

        let err = process_file(&input, false, &Converter::default()).unwrap_err();
        let cause = err.downcast_ref::<Error>().unwrap();
        assert!(matches!(cause, Error::InputFormatInvalid(_)));
    }

    #[test]
    fn test_cli_flags_override_config() {
        let args = Args::parse_from(["ppt2html", "--list-items", "--title", "Deck", "deck.pptx"]);
        let config = load_config(&args).unwrap();

        assert_eq!(config.list_mode, ListMode::Detect);
        assert_eq!(config.document_title, "Deck");
    }

    #[test]
    fn test_config_file_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("ppt2html.json");
        std::fs::write(&config_path, r#"{"classifier": {"title_max_chars": 12}}"#).unwrap();

        let args = Args::parse_from([
            "ppt2html".to_string(),
            "--config".to_string(),
            config_path.display().to_string(),
            "deck.pptx".to_string(),
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.classifier.title_max_chars, 12);
        assert_eq!(config.list_mode, ListMode::Plain);
    }
}
