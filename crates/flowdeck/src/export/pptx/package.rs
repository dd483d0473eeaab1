//! Reading and writing the OPC zip container of a presentation.

use std::io::{Cursor, Read, Write};

use log::trace;
use roxmltree::Document;
use zip::{CompressionMethod, ZipArchive, ZipWriter, write::SimpleFileOptions};

use crate::export::RenderError;

const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Upper bound on the buffer reserved from a part's declared size.
///
/// The size comes from the zip header and is not trusted; larger parts grow
/// the buffer while reading.
const MAX_PREALLOCATION: u64 = 1 << 20;

/// Relationship type of the package's main document.
pub(crate) const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// A named part of the package.
#[derive(Debug, Clone)]
struct Part {
    name: String,
    data: Vec<u8>,
}

/// An in-memory presentation package.
///
/// Parts keep the order they were read in so that rewriting a template
/// changes nothing but the replaced parts.
#[derive(Debug, Clone, Default)]
pub(crate) struct Package {
    parts: Vec<Part>,
}

impl Package {
    /// Builds a package from `(name, content)` pairs.
    pub fn from_parts<'a>(parts: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            parts: parts
                .into_iter()
                .map(|(name, data)| Part {
                    name: name.to_string(),
                    data: data.as_bytes().to_vec(),
                })
                .collect(),
        }
    }

    /// Reads every file entry of a zip archive.
    pub fn read(bytes: &[u8]) -> Result<Self, RenderError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(preallocation(file.size()));
            file.read_to_end(&mut data)?;
            trace!(part = file.name(), size = data.len(); "Read package part");
            parts.push(Part {
                name: file.name().to_string(),
                data,
            });
        }

        Ok(Self { parts })
    }

    /// Serializes the package as a deflated zip archive.
    pub fn write(&self) -> Result<Vec<u8>, RenderError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for part in &self.parts {
            writer.start_file(part.name.as_str(), options)?;
            writer.write_all(&part.data)?;
        }

        Ok(writer.finish()?.into_inner())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|part| part.name == name)
    }

    /// Returns a part's content as UTF-8 text.
    pub fn part_str(&self, name: &str) -> Result<&str, RenderError> {
        let part = self
            .parts
            .iter()
            .find(|part| part.name == name)
            .ok_or_else(|| RenderError::MissingPart(name.to_string()))?;
        std::str::from_utf8(&part.data).map_err(|err| RenderError::xml(name, err))
    }

    /// Replaces the content of an existing part.
    pub fn replace(&mut self, name: &str, data: Vec<u8>) -> Result<(), RenderError> {
        let part = self
            .parts
            .iter_mut()
            .find(|part| part.name == name)
            .ok_or_else(|| RenderError::MissingPart(name.to_string()))?;
        part.data = data;
        Ok(())
    }

    /// Relationships declared for `source`; `""` names the package itself.
    ///
    /// A missing relationships part means no relationships.
    pub fn relationships(&self, source: &str) -> Result<Vec<Relationship>, RenderError> {
        let rels_name = rels_part_name(source);
        if !self.contains(&rels_name) {
            return Ok(Vec::new());
        }

        let xml = self.part_str(&rels_name)?;
        let document = Document::parse(xml).map_err(|err| RenderError::xml(&rels_name, err))?;

        Ok(document
            .root_element()
            .children()
            .filter(|node| node.has_tag_name((PACKAGE_RELS_NS, "Relationship")))
            .filter_map(|node| {
                Some(Relationship {
                    id: node.attribute("Id")?.to_string(),
                    rel_type: node.attribute("Type")?.to_string(),
                    target: resolve_target(source, node.attribute("Target")?),
                })
            })
            .collect())
    }
}

/// One entry of a `.rels` part, with its target resolved to a part name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

/// `ppt/presentation.xml` -> `ppt/_rels/presentation.xml.rels`
fn rels_part_name(source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{source}.rels"),
    }
}

/// Resolves a relationship target against its source part.
///
/// Absolute targets start at the package root; relative ones start in the
/// source's directory and may climb with `..`.
fn resolve_target(source: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = match source.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    segments.join("/")
}

fn preallocation(declared_size: u64) -> usize {
    usize::try_from(declared_size.min(MAX_PREALLOCATION)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rels_part_name() {
        assert_eq!(
            rels_part_name("ppt/presentation.xml"),
            "ppt/_rels/presentation.xml.rels"
        );
        assert_eq!(rels_part_name(""), "_rels/.rels");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("ppt/presentation.xml", "slides/slide1.xml"),
            "ppt/slides/slide1.xml"
        );
        assert_eq!(
            resolve_target("ppt/slides/slide1.xml", "../slideLayouts/slideLayout1.xml"),
            "ppt/slideLayouts/slideLayout1.xml"
        );
        assert_eq!(
            resolve_target("ppt/presentation.xml", "/ppt/slides/slide3.xml"),
            "ppt/slides/slide3.xml"
        );
        assert_eq!(resolve_target("", "ppt/presentation.xml"), "ppt/presentation.xml");
    }

    #[test]
    fn test_zip_round_trip_keeps_order() {
        let package = Package::from_parts([("b.xml", "<b/>"), ("a.xml", "<a/>")]);

        let bytes = package.write().unwrap();
        let read = Package::read(&bytes).unwrap();

        let names: Vec<_> = read.parts.iter().map(|part| part.name.as_str()).collect();
        assert_eq!(names, ["b.xml", "a.xml"]);
        assert_eq!(read.part_str("a.xml").unwrap(), "<a/>");
    }

    #[test]
    fn test_missing_part() {
        let mut package = Package::default();

        assert!(matches!(
            package.part_str("nope.xml"),
            Err(RenderError::MissingPart(name)) if name == "nope.xml"
        ));
        assert!(package.replace("nope.xml", Vec::new()).is_err());
    }

    #[test]
    fn test_relationships() {
        let package = Package::from_parts([(
            "_rels/.rels",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
                <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
            </Relationships>"#,
        )]);

        let rels = package.relationships("").unwrap();
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].id, "rId1");
        assert_eq!(rels[0].rel_type, OFFICE_DOCUMENT_REL);
        assert_eq!(rels[0].target, "ppt/presentation.xml");

        assert!(package.relationships("ppt/presentation.xml").unwrap().is_empty());
    }

    #[test]
    fn test_declared_size_is_capped() {
        assert_eq!(preallocation(512), 512);
        assert_eq!(preallocation(u64::MAX), MAX_PREALLOCATION as usize);
    }

    #[test]
    fn test_part_larger_than_preallocation() {
        let large = "x".repeat(MAX_PREALLOCATION as usize + 10);
        let package = Package::from_parts([("big.xml", large.as_str())]);

        let read = Package::read(&package.write().unwrap()).unwrap();

        assert_eq!(read.part_str("big.xml").unwrap().len(), large.len());
    }

    #[test]
    fn test_read_rejects_non_zip() {
        assert!(matches!(
            Package::read(b"not a zip"),
            Err(RenderError::Zip(_))
        ));
    }
}
