//! Streaming DrawingML writer for shape tree fragments.
//!
//! Fragments are spliced into an existing slide, so element names are
//! qualified with whatever prefixes that slide binds to the PresentationML
//! and DrawingML namespaces. A namespace the slide leaves unprefixed is
//! declared on every top-level element written.

use log::trace;
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use flowdeck_core::{
    color::Color,
    draw::{LabelStyle, StrokeDefinition},
    geometry::{EmuPoint, EmuRect},
};

use super::{DRAWING_NS, PRESENTATION_NS};
use crate::export::RenderError;

/// Prefixes bound to the two namespaces of a slide's shape tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Prefixes {
    presentation: Option<String>,
    drawing: Option<String>,
}

impl Prefixes {
    /// `None` means the namespace has no usable prefix in scope.
    pub fn new(presentation: Option<&str>, drawing: Option<&str>) -> Self {
        let usable = |prefix: Option<&str>| prefix.filter(|p| !p.is_empty()).map(str::to_string);
        Self {
            presentation: usable(presentation),
            drawing: usable(drawing),
        }
    }
}

impl Default for Prefixes {
    fn default() -> Self {
        Self::new(Some("p"), Some("a"))
    }
}

/// Writes `p:sp` / `p:cxnSp` fragments into a buffer.
pub(crate) struct DrawingWriter {
    writer: Writer<Vec<u8>>,
    p: String,
    a: String,
    declarations: Vec<(String, &'static str)>,
}

impl DrawingWriter {
    pub fn new(prefixes: &Prefixes) -> Self {
        let mut declarations = Vec::new();
        let p = prefixes.presentation.clone().unwrap_or_else(|| {
            declarations.push(("xmlns:p".to_string(), PRESENTATION_NS));
            "p".to_string()
        });
        let a = prefixes.drawing.clone().unwrap_or_else(|| {
            declarations.push(("xmlns:a".to_string(), DRAWING_NS));
            "a".to_string()
        });

        Self {
            writer: Writer::new(Vec::new()),
            p,
            a,
            declarations,
        }
    }

    fn p(&self, local: &str) -> String {
        format!("{}:{local}", self.p)
    }

    fn a(&self, local: &str) -> String {
        format!("{}:{local}", self.a)
    }

    fn start(&mut self, name: &str, attrs: &[(&str, String)]) -> Result<(), RenderError> {
        let mut elem = BytesStart::new(name);
        for (key, value) in attrs {
            elem.push_attribute((*key, value.as_str()));
        }
        self.writer.write_event(Event::Start(elem))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, String)]) -> Result<(), RenderError> {
        let mut elem = BytesStart::new(name);
        for (key, value) in attrs {
            elem.push_attribute((*key, value.as_str()));
        }
        self.writer.write_event(Event::Empty(elem))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text(&mut self, content: &str) -> Result<(), RenderError> {
        self.writer
            .write_event(Event::Text(BytesText::new(content)))?;
        Ok(())
    }

    /// Opens a top-level shape tree element, declaring missing prefixes.
    fn start_top_level(&mut self, local: &str) -> Result<(), RenderError> {
        let name = self.p(local);
        let mut elem = BytesStart::new(name.as_str());
        for (key, uri) in &self.declarations {
            elem.push_attribute((key.as_str(), *uri));
        }
        self.writer.write_event(Event::Start(elem))?;
        Ok(())
    }

    /// `<p:cNvPr id=".." name=".."/>`
    fn non_visual_properties(&mut self, id: u32, name: &str) -> Result<(), RenderError> {
        let tag = self.p("cNvPr");
        self.empty(&tag, &[("id", id.to_string()), ("name", name.to_string())])
    }

    /// `<a:xfrm>` with optional flips, then `<a:off>` and `<a:ext>`.
    fn transform(&mut self, rect: &EmuRect, flip_h: bool, flip_v: bool) -> Result<(), RenderError> {
        let mut attrs = Vec::new();
        if flip_h {
            attrs.push(("flipH", "1".to_string()));
        }
        if flip_v {
            attrs.push(("flipV", "1".to_string()));
        }

        let xfrm = self.a("xfrm");
        self.start(&xfrm, &attrs)?;
        let off = self.a("off");
        self.empty(&off, &[("x", rect.x.to_string()), ("y", rect.y.to_string())])?;
        let ext = self.a("ext");
        self.empty(&ext, &[("cx", rect.cx.to_string()), ("cy", rect.cy.to_string())])?;
        self.end(&xfrm)
    }

    fn preset_geometry(&mut self, preset: &str) -> Result<(), RenderError> {
        let tag = self.a("prstGeom");
        self.start(&tag, &[("prst", preset.to_string())])?;
        let av = self.a("avLst");
        self.empty(&av, &[])?;
        self.end(&tag)
    }

    fn solid_fill(&mut self, color: Color) -> Result<(), RenderError> {
        let fill = self.a("solidFill");
        self.start(&fill, &[])?;
        let srgb = self.a("srgbClr");
        self.empty(&srgb, &[("val", color.to_srgb_hex())])?;
        self.end(&fill)
    }

    /// `<a:ln>` with an optional arrow head at the line's end.
    fn line(&mut self, stroke: &StrokeDefinition, arrow_head: bool) -> Result<(), RenderError> {
        let ln = self.a("ln");
        self.start(&ln, &[("w", stroke.width_emu().to_string())])?;
        self.solid_fill(stroke.color())?;
        if arrow_head {
            let tail = self.a("tailEnd");
            self.empty(&tail, &[("type", "triangle".to_string())])?;
        }
        self.end(&ln)
    }

    /// A centered text body, one paragraph per line of `label`.
    fn text_body(&mut self, label: &str, style: &LabelStyle) -> Result<(), RenderError> {
        let tx_body = self.p("txBody");
        self.start(&tx_body, &[])?;
        let body_pr = self.a("bodyPr");
        self.empty(
            &body_pr,
            &[
                ("wrap", "square".to_string()),
                ("rtlCol", "0".to_string()),
                ("anchor", "ctr".to_string()),
            ],
        )?;
        let lst_style = self.a("lstStyle");
        self.empty(&lst_style, &[])?;

        let size = style.font_size_centipoints().to_string();
        let paragraph = self.a("p");
        let paragraph_pr = self.a("pPr");

        if label.is_empty() {
            self.start(&paragraph, &[])?;
            self.empty(&paragraph_pr, &[("algn", "ctr".to_string())])?;
            let end_pr = self.a("endParaRPr");
            self.empty(&end_pr, &[("sz", size)])?;
            self.end(&paragraph)?;
            return self.end(&tx_body);
        }

        for line in label.lines() {
            self.start(&paragraph, &[])?;
            self.empty(&paragraph_pr, &[("algn", "ctr".to_string())])?;

            let run = self.a("r");
            self.start(&run, &[])?;
            let run_pr = self.a("rPr");
            self.start(&run_pr, &[("sz", size.clone()), ("dirty", "0".to_string())])?;
            self.solid_fill(style.color())?;
            for font in ["latin", "ea", "cs"] {
                let tag = self.a(font);
                self.empty(&tag, &[("typeface", style.font_family().to_string())])?;
            }
            self.end(&run_pr)?;

            let t = self.a("t");
            self.start(&t, &[])?;
            self.text(line)?;
            self.end(&t)?;
            self.end(&run)?;
            self.end(&paragraph)?;
        }

        self.end(&tx_body)
    }

    /// Writes a preset-geometry shape with a centered label.
    pub fn shape(&mut self, shape: ShapeXml<'_>) -> Result<(), RenderError> {
        trace!(id = shape.id, preset = shape.preset; "Writing shape");
        self.start_top_level("sp")?;

        let nv_sp_pr = self.p("nvSpPr");
        self.start(&nv_sp_pr, &[])?;
        self.non_visual_properties(shape.id, shape.name)?;
        let c_nv_sp_pr = self.p("cNvSpPr");
        self.empty(&c_nv_sp_pr, &[])?;
        let nv_pr = self.p("nvPr");
        self.empty(&nv_pr, &[])?;
        self.end(&nv_sp_pr)?;

        let sp_pr = self.p("spPr");
        self.start(&sp_pr, &[])?;
        self.transform(&shape.rect, false, false)?;
        self.preset_geometry(shape.preset)?;
        self.solid_fill(shape.fill)?;
        self.line(shape.outline, false)?;
        self.end(&sp_pr)?;

        self.text_body(shape.label, shape.label_style)?;

        let sp = self.p("sp");
        self.end(&sp)
    }

    /// Writes a connector glued to two shapes.
    pub fn connector(&mut self, connector: ConnectorXml<'_>) -> Result<(), RenderError> {
        trace!(id = connector.id, preset = connector.preset; "Writing connector");
        self.start_top_level("cxnSp")?;

        let nv_cxn_sp_pr = self.p("nvCxnSpPr");
        self.start(&nv_cxn_sp_pr, &[])?;
        self.non_visual_properties(connector.id, connector.name)?;
        let c_nv_cxn_sp_pr = self.p("cNvCxnSpPr");
        self.start(&c_nv_cxn_sp_pr, &[])?;
        let st_cxn = self.a("stCxn");
        self.empty(
            &st_cxn,
            &[
                ("id", connector.begin.shape_id.to_string()),
                ("idx", connector.begin.site.to_string()),
            ],
        )?;
        let end_cxn = self.a("endCxn");
        self.empty(
            &end_cxn,
            &[
                ("id", connector.end.shape_id.to_string()),
                ("idx", connector.end.site.to_string()),
            ],
        )?;
        self.end(&c_nv_cxn_sp_pr)?;
        let nv_pr = self.p("nvPr");
        self.empty(&nv_pr, &[])?;
        self.end(&nv_cxn_sp_pr)?;

        let (rect, flip_h, flip_v) = EmuRect::spanning(connector.begin.point, connector.end.point);
        let sp_pr = self.p("spPr");
        self.start(&sp_pr, &[])?;
        self.transform(&rect, flip_h, flip_v)?;
        self.preset_geometry(connector.preset)?;
        self.line(connector.stroke, true)?;
        self.end(&sp_pr)?;

        let cxn_sp = self.p("cxnSp");
        self.end(&cxn_sp)
    }

    /// Returns everything written so far.
    pub fn into_string(self) -> Result<String, RenderError> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|err| RenderError::xml("shape tree fragment", err))
    }
}

/// Everything needed to write one `p:sp`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ShapeXml<'a> {
    pub id: u32,
    pub name: &'a str,
    pub preset: &'a str,
    pub rect: EmuRect,
    pub fill: Color,
    pub outline: &'a StrokeDefinition,
    pub label: &'a str,
    pub label_style: &'a LabelStyle,
}

/// One glued end of a connector.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConnectionEnd {
    pub shape_id: u32,
    pub site: u32,
    pub point: EmuPoint,
}

/// Everything needed to write one `p:cxnSp`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConnectorXml<'a> {
    pub id: u32,
    pub name: &'a str,
    pub preset: &'a str,
    pub begin: ConnectionEnd,
    pub end: ConnectionEnd,
    pub stroke: &'a StrokeDefinition,
}

#[cfg(test)]
mod tests {
    use flowdeck_core::geometry::Emu;

    use super::*;

    fn rect(x: i64, y: i64, cx: i64, cy: i64) -> EmuRect {
        EmuRect {
            x: Emu::new(x),
            y: Emu::new(y),
            cx: Emu::new(cx),
            cy: Emu::new(cy),
        }
    }

    #[test]
    fn test_shape_fragment() {
        let outline = StrokeDefinition::default();
        let style = LabelStyle::default();
        let mut writer = DrawingWriter::new(&Prefixes::default());

        writer
            .shape(ShapeXml {
                id: 4,
                name: "Rectangle Task_1",
                preset: "rect",
                rect: rect(10, 20, 30, 40),
                fill: Color::new("white").unwrap(),
                outline: &outline,
                label: "Check <stock>",
                label_style: &style,
            })
            .unwrap();
        let xml = writer.into_string().unwrap();

        assert!(xml.starts_with("<p:sp><p:nvSpPr><p:cNvPr id=\"4\" name=\"Rectangle Task_1\"/>"));
        assert!(xml.contains("<a:off x=\"10\" y=\"20\"/><a:ext cx=\"30\" cy=\"40\"/>"));
        assert!(xml.contains("<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>"));
        assert!(xml.contains("<a:t>Check &lt;stock&gt;</a:t>"));
        assert!(xml.contains("sz=\"720\""));
        assert!(xml.contains("<a:latin typeface=\"Arial\"/>"));
        assert!(xml.ends_with("</p:txBody></p:sp>"));
    }

    #[test]
    fn test_empty_label_has_end_paragraph_properties() {
        let outline = StrokeDefinition::default();
        let style = LabelStyle::default();
        let mut writer = DrawingWriter::new(&Prefixes::default());

        writer
            .shape(ShapeXml {
                id: 2,
                name: "Oval S",
                preset: "ellipse",
                rect: rect(0, 0, 10, 10),
                fill: Color::default(),
                outline: &outline,
                label: "",
                label_style: &style,
            })
            .unwrap();
        let xml = writer.into_string().unwrap();

        assert!(xml.contains("<a:endParaRPr sz=\"720\"/>"));
        assert!(!xml.contains("<a:r>"));
    }

    #[test]
    fn test_connector_fragment_with_custom_prefixes() {
        let stroke = StrokeDefinition::default();
        let mut writer = DrawingWriter::new(&Prefixes::new(Some("pml"), None));

        writer
            .connector(ConnectorXml {
                id: 9,
                name: "Elbow Connector 9",
                preset: "bentConnector3",
                begin: ConnectionEnd {
                    shape_id: 2,
                    site: 3,
                    point: EmuPoint::new(Emu::new(100), Emu::new(50)),
                },
                end: ConnectionEnd {
                    shape_id: 3,
                    site: 1,
                    point: EmuPoint::new(Emu::new(40), Emu::new(90)),
                },
                stroke: &stroke,
            })
            .unwrap();
        let xml = writer.into_string().unwrap();

        assert!(xml.starts_with(
            "<pml:cxnSp xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\">"
        ));
        assert!(xml.contains("<a:stCxn id=\"2\" idx=\"3\"/><a:endCxn id=\"3\" idx=\"1\"/>"));
        assert!(xml.contains("<a:xfrm flipH=\"1\"><a:off x=\"40\" y=\"50\"/><a:ext cx=\"60\" cy=\"40\"/>"));
        assert!(xml.contains("<a:tailEnd type=\"triangle\"/>"));
        assert!(xml.ends_with("</pml:cxnSp>"));
    }
}
