//! SVG export of the drawing surface.

use std::path::{Path, PathBuf};

use svg::Document;
use svg::node::element::{Circle, Group, Line, Rectangle, Text};

use crate::scene::{Anchor, Geometry, Node, Paint, Surface, TextBlock};

pub const DEFAULT_EXPORT_NAME: &str = "upset_plot.svg";
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn anchor_name(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    }
}

fn transform(node: &Node, rotate: Option<f64>) -> Option<String> {
    let (tx, ty) = node.translate;
    let mut parts = Vec::new();
    if tx != 0.0 || ty != 0.0 {
        parts.push(format!("translate({tx},{ty})"));
    }
    if let Some(deg) = rotate {
        parts.push(format!("rotate({deg})"));
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Paint attributes as written by SVG. Shapes without a fill get
/// `fill="none"`, groups just leave it to their children.
fn paint_attributes(paint: &Paint, is_shape: bool) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    match paint.fill {
        Some(c) => attrs.push(("fill", c.to_css())),
        None if is_shape => attrs.push(("fill", "none".to_string())),
        None => {}
    }
    if paint.fill_opacity != 1.0 {
        attrs.push(("fill-opacity", paint.fill_opacity.to_string()));
    }
    if let Some(c) = paint.stroke {
        attrs.push(("stroke", c.to_css()));
        attrs.push(("stroke-width", paint.stroke_width.to_string()));
    }
    if paint.opacity != 1.0 {
        attrs.push(("opacity", paint.opacity.to_string()));
    }
    attrs
}

fn text_lines(block: &TextBlock) -> Vec<Text> {
    block
        .lines
        .iter()
        .zip(block.line_positions())
        .map(|(line, (y, size))| {
            let text = Text::new(line.text.clone())
                .set("x", block.x)
                .set("y", y)
                .set("font-size", size);
            if block.middle_baseline {
                text.set("dominant-baseline", "middle")
            } else {
                text
            }
        })
        .collect()
}

fn export_node(node: &Node) -> Group {
    let rotate = node.text().and_then(|t| t.rotate);
    let mut group = Group::new().set("class", node.class);
    if let Some(id) = &node.dom_id {
        group = group.set("id", id.clone());
    }
    if let Some(t) = transform(node, rotate) {
        group = group.set("transform", t);
    }

    let is_shape = !matches!(node.geometry, Geometry::Group | Geometry::Text(_));
    if !is_shape {
        for (name, value) in paint_attributes(&node.paint, false) {
            group = group.set(name, value);
        }
    }

    match &node.geometry {
        Geometry::Group => {}
        Geometry::Rect {
            x,
            y,
            width,
            height,
            rx,
        } => {
            let mut rect = Rectangle::new()
                .set("x", *x)
                .set("y", *y)
                .set("width", *width)
                .set("height", *height);
            if *rx > 0.0 {
                rect = rect.set("rx", *rx);
            }
            for (name, value) in paint_attributes(&node.paint, true) {
                rect = rect.set(name, value);
            }
            group = group.add(rect);
        }
        Geometry::Circle { cx, cy, r } => {
            let mut circle = Circle::new().set("cx", *cx).set("cy", *cy).set("r", *r);
            for (name, value) in paint_attributes(&node.paint, true) {
                circle = circle.set(name, value);
            }
            group = group.add(circle);
        }
        Geometry::Line { x1, y1, x2, y2 } => {
            let mut line = Line::new()
                .set("x1", *x1)
                .set("y1", *y1)
                .set("x2", *x2)
                .set("y2", *y2);
            for (name, value) in paint_attributes(&node.paint, true) {
                line = line.set(name, value);
            }
            group = group.add(line);
        }
        Geometry::Text(block) => {
            group = group
                .set("font-family", FONT_FAMILY)
                .set("text-anchor", anchor_name(block.anchor));
            for text in text_lines(block) {
                group = group.add(text);
            }
        }
    }

    for child in node.children() {
        group = group.add(export_node(child));
    }
    group
}

/// Serialize the whole surface to an SVG document.
pub fn export_svg(surface: &Surface) -> String {
    let doc = Document::new()
        .set("viewBox", (0.0, 0.0, surface.width, surface.height))
        .set("width", surface.width)
        .set("height", surface.height)
        .set("style", "background:#ffffff")
        .add(export_node(surface.root()));
    doc.to_string()
}

pub fn write_svg(surface: &Surface, path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, export_svg(surface)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::scene::TextLine;
    use tempfile::tempdir;

    fn surface() -> Surface {
        let mut surface = Surface::new(200.0, 100.0);
        let (root, ids) = surface.parts_mut();
        let g = root.ensure_group(ids, "padding");
        g.translate = (20.0, 50.0);
        g.ensure_child(ids, "bar", Geometry::rect(0.0, 0.0, 30.0, 10.0))
            .paint = Paint::fill(Color::rgb(255, 0, 0)).with_fill_opacity(0.5);
        g.ensure_child(ids, "dot", Geometry::Circle { cx: 5.0, cy: 5.0, r: 3.0 })
            .paint = Paint::stroke(Color::BLACK, 2.0);
        let text = TextBlock::new(vec![
            TextLine::new("Pattern frequency"),
            TextLine::below("(drag handle)", 15.0),
        ])
        .anchored(Anchor::Middle)
        .rotated(-75.0);
        g.ensure_child(ids, "title", Geometry::Text(text));
        surface
    }

    #[test]
    fn document_carries_shapes_and_transforms() {
        let out = export_svg(&surface());
        assert!(out.starts_with("<svg"));
        assert!(out.contains("viewBox=\"0 0 200 100\""));
        assert!(out.contains("transform=\"translate(20,50)\""));
        assert!(out.contains("fill=\"#ff0000\""));
        assert!(out.contains("fill-opacity=\"0.5\""));
        assert!(out.contains("stroke-width=\"2\""));
        assert!(out.contains("fill=\"none\""));
    }

    #[test]
    fn text_lines_become_separate_elements() {
        let out = export_svg(&surface());
        assert!(out.contains(">Pattern frequency</text>"));
        assert!(out.contains(">(drag handle)</text>"));
        assert!(out.contains("text-anchor=\"middle\""));
        assert!(out.contains("rotate(-75)"));
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_EXPORT_NAME);
        write_svg(&surface(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
        assert!(written.contains("Pattern frequency"));
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.svg");
        let err = write_svg(&surface(), &path).unwrap_err();
        assert!(err.to_string().contains("out.svg"));
    }
}
