//! Graphviz DOT rendering of a context's transition graph.

use crate::core::Event;
use crate::machine::Context;
use std::io::{self, Write};

/// Edge color, chosen by which hooks an event declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeColor {
    /// Only an after hook
    Blue,
    /// Only a before hook
    Green,
    /// Both hooks
    Red,
}

impl EdgeColor {
    /// Color for `event`, or `None` when it declares no hooks.
    pub fn for_event<T>(event: &Event<T>) -> Option<Self> {
        match (event.has_before_hook(), event.has_after_hook()) {
            (false, true) => Some(Self::Blue),
            (true, false) => Some(Self::Green),
            (true, true) => Some(Self::Red),
            (false, false) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
        }
    }
}

impl<T> Context<T> {
    /// Render the transition graph as DOT.
    ///
    /// Edges are listed in lookup order, newest event first.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph fsm {\n");
        for (_, event) in self.registry.events().rev() {
            let from = self.registry.state_at(event.from()).name();
            let to = self.registry.state_at(event.to()).name();
            out.push_str(&format!(
                "  \"{}\" -> \"{}\" [label = \"{}\"",
                escape(from),
                escape(to),
                escape(event.name())
            ));
            if let Some(color) = EdgeColor::for_event(event) {
                let color = color.as_str();
                out.push_str(&format!(", color = {color}, fontcolor = {color}"));
            }
            out.push_str("];\n");
        }
        out.push_str("}\n");
        out
    }

    pub fn write_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.to_dot().as_bytes())
    }

    /// Write the DOT rendering to stdout.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_dot(&mut handle)?;
        handle.flush()
    }
}

/// Quote-safe and single-line: every edge must stay on its own line.
fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
