//! Small SVG writer used to serialize a [`Scene`](crate::Scene).

use std::fmt::Write;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Escape text content and attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Builder that appends indented SVG elements to a string.
pub struct SvgBuilder {
    output: String,
    indent: usize,
}

impl SvgBuilder {
    /// Open the root `<svg>` element with a `0 0 width height` view box.
    pub fn new(width: f64, height: f64) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(
            output,
            r#"<svg xmlns="{SVG_NS}" viewBox="0 0 {width} {height}" width="100%" height="{height}">"#
        );
        Self { output, indent: 1 }
    }

    /// Open a `<g>` with the given attributes.
    pub fn open_group(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str("<g");
        self.write_attrs(attrs);
        self.output.push_str(">\n");
        self.indent += 1;
        self
    }

    pub fn close_group(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        self.output.push_str("</g>\n");
        self
    }

    pub fn path(&mut self, d: &str, class: &str) -> &mut Self {
        self.empty_element("path", &[("d", d), ("class", class)])
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, class: &str) -> &mut Self {
        let (cx, cy, r) = (cx.to_string(), cy.to_string(), r.to_string());
        self.empty_element(
            "circle",
            &[("cx", &cx), ("cy", &cy), ("r", &r), ("fill", fill), ("class", class)],
        )
    }

    pub fn text(&mut self, x: f64, y: f64, class: &str, content: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(
            self.output,
            r#"<text x="{x}" y="{y}" class="{}">{}</text>"#,
            escape_xml(class),
            escape_xml(content)
        );
        self
    }

    fn empty_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "<{name}");
        self.write_attrs(attrs);
        self.output.push_str("/>\n");
        self
    }

    fn write_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (key, value) in attrs {
            let _ = write!(self.output, r#" {key}="{}""#, escape_xml(value));
        }
    }

    /// Close any open groups and the root element.
    pub fn build(mut self) -> String {
        while self.indent > 1 {
            self.close_group();
        }
        self.output.push_str("</svg>\n");
        self.output
    }
}
