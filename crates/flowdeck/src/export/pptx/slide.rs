//! Locating the target slide and splicing shapes into its shape tree.

use log::debug;
use roxmltree::{Document, Node};

use super::{
    DRAWING_NS, PRESENTATION_NS, RELATIONSHIPS_NS,
    package::{OFFICE_DOCUMENT_REL, Package},
    writer::Prefixes,
};
use crate::export::RenderError;

/// Resolves the part name of the slide at `index` in presentation order.
///
/// Order comes from `p:sldIdLst` of the main presentation part, not from
/// part names, so reordered decks are honored.
pub(crate) fn locate(package: &Package, index: usize) -> Result<String, RenderError> {
    let presentation = package
        .relationships("")?
        .into_iter()
        .find(|rel| rel.rel_type == OFFICE_DOCUMENT_REL)
        .map(|rel| rel.target)
        .ok_or_else(|| RenderError::MissingPart("main presentation part".to_string()))?;

    let xml = package.part_str(&presentation)?;
    let document = Document::parse(xml).map_err(|err| RenderError::xml(&presentation, err))?;

    let slide_ids: Vec<&str> = document
        .root_element()
        .children()
        .find(|node| node.has_tag_name((PRESENTATION_NS, "sldIdLst")))
        .map(|list| {
            list.children()
                .filter(|node| node.has_tag_name((PRESENTATION_NS, "sldId")))
                .filter_map(|node| node.attribute((RELATIONSHIPS_NS, "id")))
                .collect()
        })
        .unwrap_or_default();

    let relationship_id = slide_ids
        .get(index)
        .ok_or(RenderError::SlideOutOfRange {
            index,
            count: slide_ids.len(),
        })?;

    let slide = package
        .relationships(&presentation)?
        .into_iter()
        .find(|rel| rel.id == *relationship_id)
        .map(|rel| rel.target)
        .ok_or_else(|| {
            RenderError::xml(
                &presentation,
                format!("slide relationship `{relationship_id}` is not declared"),
            )
        })?;

    debug!(index, part = slide.as_str(); "Located target slide");
    Ok(slide)
}

/// What the renderer needs to know about a slide's shape tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShapeTree {
    prefixes: Prefixes,
    next_shape_id: u32,
    insert_at: usize,
}

impl ShapeTree {
    /// Inspects the first `p:spTree` of a slide part.
    pub fn inspect(part: &str, xml: &str) -> Result<Self, RenderError> {
        let document = Document::parse(xml).map_err(|err| RenderError::xml(part, err))?;

        let tree = document
            .descendants()
            .find(|node| node.has_tag_name((PRESENTATION_NS, "spTree")))
            .ok_or_else(|| RenderError::xml(part, "slide has no shape tree"))?;

        let range = tree.range();
        let element = &xml[range.clone()];
        if element.ends_with("/>") {
            return Err(RenderError::xml(part, "shape tree is empty"));
        }
        let insert_at = xml[..range.end]
            .rfind("</")
            .filter(|pos| *pos > range.start)
            .ok_or_else(|| RenderError::xml(part, "shape tree has no closing tag"))?;

        let max_id = document
            .descendants()
            .filter(|node| node.has_tag_name((PRESENTATION_NS, "cNvPr")))
            .filter_map(|node| node.attribute("id")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        let next_shape_id = max_id
            .checked_add(1)
            .ok_or_else(|| RenderError::xml(part, "slide already uses the largest shape id"))?;

        Ok(Self {
            prefixes: prefixes_at(tree),
            next_shape_id,
            insert_at,
        })
    }

    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    /// First shape id not used anywhere on the slide.
    pub fn next_shape_id(&self) -> u32 {
        self.next_shape_id
    }

    /// Inserts `fragment` as the last children of the shape tree.
    pub fn splice(&self, xml: &str, fragment: &str) -> String {
        let mut spliced = String::with_capacity(xml.len() + fragment.len());
        spliced.push_str(&xml[..self.insert_at]);
        spliced.push_str(fragment);
        spliced.push_str(&xml[self.insert_at..]);
        spliced
    }
}

fn prefixes_at(node: Node<'_, '_>) -> Prefixes {
    Prefixes::new(
        node.lookup_prefix(PRESENTATION_NS),
        node.lookup_prefix(DRAWING_NS),
    )
}
