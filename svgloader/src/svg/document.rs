use std::borrow::Cow;
use std::fs;
use std::path::Path as FilePath;

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};
use roxmltree::{Document, Node, ParsingOptions};

use crate::error::{LoaderError, Result};
use crate::geom::path::Path;
use crate::svg::path_data::parse_path_data;

#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    path_data: Vec<String>,
}

impl SvgDocument {
    pub fn from_file(path: impl AsRef<FilePath>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| LoaderError::Io {
            source: e,
            msg: format!("Failed to read svg file {}", path.display()),
        })?;
        let text = decode_text(&bytes)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(text, options)
            .map_err(|e| LoaderError::Parse(e.to_string()))?;

        let mut path_data = Vec::new();
        for node in doc.descendants().filter(|n| is_svg_path(n)) {
            match node.attribute("d") {
                Some(d) => path_data.push(d.to_string()),
                None => {
                    warn!("<path> element without a d attribute");
                    path_data.push(String::new());
                }
            }
        }
        debug!("svg document holds {} path elements", path_data.len());
        Ok(SvgDocument { path_data })
    }

    pub fn path_data(&self) -> &[String] {
        self.path_data.as_slice()
    }

    pub fn paths(&self) -> Result<Vec<Path>> {
        self.path_data
            .iter()
            .map(|d| parse_path_data(d))
            .collect()
    }
}

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn is_svg_path(node: &Node) -> bool {
    let name = node.tag_name();
    name.name() == "path" && matches!(name.namespace(), None | Some(SVG_NS))
}

// UTF-8 first, then whatever the xml declaration names.
fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }
    match declared_encoding(bytes).and_then(|label| Encoding::for_label(label.as_bytes())) {
        Some(encoding) if encoding != UTF_8 => encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| {
                LoaderError::Parse(format!("svg data is not valid {}", encoding.name()))
            }),
        _ => Err(LoaderError::Parse("svg data is not valid UTF-8".to_string())),
    }
}

fn declared_encoding(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(256)];
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&head[..end]).ok()?;
    let decl = decl.trim_start().strip_prefix("<?xml")?;
    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    rest.find(quote).map(|i| &rest[..i])
}
