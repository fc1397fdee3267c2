//! PPTX file parser implementation.

use ppt2html_core::{Error, Presentation, PresentationFormat, Result, ShapeRecord, SourceSlide};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";
const SLIDE_REL_TYPE_SUFFIX: &str = "/slide";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Open and parse a presentation file from disk.
    ///
    /// Missing files are reported as [`Error::InputNotFound`]; legacy `.ppt`
    /// files and anything that is not a ZIP package as
    /// [`Error::InputFormatInvalid`].
    pub fn parse_file(&self, path: &Path) -> Result<Presentation> {
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }

        let mut file = File::open(path)?;
        let mut magic = [0u8; 8];
        let read = file.read(&mut magic)?;
        file.rewind()?;

        let format = PresentationFormat::from_magic(&magic[..read]).or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(PresentationFormat::from_extension)
        });

        match format {
            Some(PresentationFormat::Pptx) => {}
            Some(PresentationFormat::Ppt) => {
                return Err(Error::InputFormatInvalid(format!(
                    "{} is a legacy PowerPoint 97-2003 file; save it as .pptx first",
                    path.display()
                )));
            }
            None => {
                return Err(Error::InputFormatInvalid(format!(
                    "{} is not a presentation file",
                    path.display()
                )));
            }
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");

        self.parse(BufReader::new(file), filename)
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<Presentation> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::InputFormatInvalid(format!("Not a ZIP package: {}", e)))?;

        let mut presentation = Presentation::new(filename, PresentationFormat::Pptx);

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("{}: {} slides", filename, slide_order.len());

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            presentation.add_slide(slide);
        }

        Ok(presentation)
    }

    /// Get the ordered list of slide part paths.
    ///
    /// The order comes from `sldIdLst` in `presentation.xml`. Packages
    /// without it fall back to the slide relationships sorted by number.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        if archive.by_name(PRESENTATION_RELS_PATH).is_err() {
            return Err(Error::InputFormatInvalid(format!(
                "Not a presentation: missing {}",
                PRESENTATION_RELS_PATH
            )));
        }

        let rels_content = self.read_file_from_archive(archive, PRESENTATION_RELS_PATH)?;
        let slide_rels = parse_slide_relationships(&rels_content)?;

        let listed_ids = match self.read_file_from_archive(archive, PRESENTATION_PATH) {
            Ok(content) => parse_slide_id_list(&content)?,
            Err(e) => {
                log::warn!("Could not read {}: {}", PRESENTATION_PATH, e);
                Vec::new()
            }
        };

        if !listed_ids.is_empty() {
            let targets: HashMap<&str, &str> = slide_rels
                .iter()
                .map(|(id, target)| (id.as_str(), target.as_str()))
                .collect();

            return Ok(listed_ids
                .iter()
                .filter_map(|id| match targets.get(id.as_str()) {
                    Some(target) => Some(resolve_target(target)),
                    None => {
                        log::warn!("Slide relationship '{}' not found, skipping", id);
                        None
                    }
                })
                .collect());
        }

        let mut slides: Vec<(String, Option<usize>)> = slide_rels
            .iter()
            .map(|(id, target)| {
                let order_num = extract_slide_number(target).or_else(|| extract_slide_number(id));
                (resolve_target(target), order_num)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide from the archive.
    ///
    /// A slide part that cannot be read yields an empty slide so slide
    /// numbering stays aligned with the source.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<SourceSlide> {
        let mut slide = SourceSlide::new(slide_number);

        let content = match self.read_file_from_archive(archive, slide_path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Slide {}: {} (rendering empty slide)", slide_number, e);
                return Ok(slide);
            }
        };

        for shape in self.extract_shapes_from_xml(&content, slide_number) {
            slide.add_shape(shape);
        }

        Ok(slide)
    }

    /// Extract shape records from slide XML, in document order.
    ///
    /// Group shapes are flattened. Graphic frames (tables, charts) and
    /// `mc:Fallback` content are skipped. Malformed XML drops only the shape
    /// being read; reading resumes with the next event.
    fn extract_shapes_from_xml(&self, xml_content: &str, slide_number: usize) -> Vec<ShapeRecord> {
        let mut shapes = Vec::new();
        let mut reader = Reader::from_str(xml_content);
        reader.trim_text(false);

        let mut current_shape: Option<ShapeBuilder> = None;
        let mut skip_depth = 0usize;

        loop {
            let position = reader.buffer_position();
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = e.name();
                    let local_name = local_name(name.as_ref());

                    if skip_depth > 0 || matches!(local_name, b"graphicFrame" | b"Fallback") {
                        skip_depth += 1;
                        continue;
                    }

                    match local_name {
                        b"sp" | b"pic" | b"cxnSp" => {
                            if current_shape.is_some() {
                                log::warn!("Slide {}: nested shape, dropping outer shape", slide_number);
                            }
                            current_shape = Some(ShapeBuilder::new(local_name == b"pic"));
                        }
                        _ => {
                            if let Some(ref mut shape) = current_shape {
                                shape.start(local_name);
                            }
                        }
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if skip_depth > 0 {
                        continue;
                    }
                    let name = e.name();
                    if let Some(ref mut shape) = current_shape {
                        shape.empty(local_name(name.as_ref()));
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if skip_depth > 0 {
                        continue;
                    }
                    if let Some(ref mut shape) = current_shape {
                        if shape.in_run_text {
                            let text = e.unescape().unwrap_or_default();
                            shape.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    if skip_depth > 0 {
                        skip_depth -= 1;
                        continue;
                    }
                    let name = e.name();
                    let local_name = local_name(name.as_ref());

                    match local_name {
                        b"sp" | b"pic" | b"cxnSp" => {
                            if let Some(shape) = current_shape.take() {
                                shapes.push(shape.finish());
                            }
                        }
                        _ => {
                            if let Some(ref mut shape) = current_shape {
                                shape.end(local_name);
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    log::warn!(
                        "Slide {}: XML error at position {}, skipping shape: {}",
                        slide_number,
                        reader.buffer_position(),
                        e
                    );
                    current_shape = None;
                    skip_depth = 0;

                    // The reader cannot get past this error.
                    if reader.buffer_position() <= position {
                        break;
                    }
                }
                _ => {}
            }
        }

        shapes
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates one shape's content while its XML is being read.
#[derive(Debug)]
struct ShapeBuilder {
    is_picture: bool,
    has_text_body: bool,
    in_text_body: bool,
    in_run_text: bool,
    paragraphs: usize,
    text: String,
}

impl ShapeBuilder {
    fn new(is_picture: bool) -> Self {
        Self {
            is_picture,
            has_text_body: false,
            in_text_body: false,
            in_run_text: false,
            paragraphs: 0,
            text: String::new(),
        }
    }

    fn start(&mut self, local_name: &[u8]) {
        match local_name {
            b"txBody" => {
                self.has_text_body = true;
                self.in_text_body = true;
            }
            b"p" if self.in_text_body => self.start_paragraph(),
            b"t" if self.in_text_body => self.in_run_text = true,
            _ => {}
        }
    }

    fn empty(&mut self, local_name: &[u8]) {
        match local_name {
            b"txBody" => self.has_text_body = true,
            b"p" if self.in_text_body => self.start_paragraph(),
            b"br" if self.in_text_body => self.text.push('\n'),
            _ => {}
        }
    }

    fn end(&mut self, local_name: &[u8]) {
        match local_name {
            b"txBody" => self.in_text_body = false,
            b"t" => self.in_run_text = false,
            _ => {}
        }
    }

    fn start_paragraph(&mut self) {
        if self.paragraphs > 0 {
            self.text.push('\n');
        }
        self.paragraphs += 1;
    }

    fn finish(self) -> ShapeRecord {
        ShapeRecord {
            has_text: self.has_text_body,
            text: self.text,
            is_picture: self.is_picture,
        }
    }
}

/// Collect `(Id, Target)` of every slide relationship, in file order.
fn parse_slide_relationships(rels_content: &str) -> Result<Vec<(String, String)>> {
    let mut slides = Vec::new();
    let mut reader = Reader::from_str(rels_content);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let rel_type = attribute(e, b"Type").unwrap_or_default();
                if !rel_type.ends_with(SLIDE_REL_TYPE_SUFFIX) {
                    continue;
                }
                match (attribute(e, b"Id"), attribute(e, b"Target")) {
                    (Some(id), Some(target)) => slides.push((id, target)),
                    _ => log::warn!("Slide relationship without Id or Target, skipping"),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(slides)
}

/// Collect the relationship ids of `p:sldId` entries, in presentation order.
fn parse_slide_id_list(presentation_content: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(presentation_content);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                // `id` is the numeric slide id; the prefixed `r:id` is the relationship.
                let rel_id = e.attributes().flatten().find_map(|attr| {
                    let key = attr.key.as_ref();
                    (key != b"id" && local_name(key) == b"id")
                        .then(|| String::from_utf8_lossy(&attr.value).to_string())
                });
                if let Some(rel_id) = rel_id {
                    ids.push(rel_id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::PptxParseError(format!(
                    "Error parsing {}: {}",
                    PRESENTATION_PATH, e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Turn a relationship target into a path inside the archive.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
