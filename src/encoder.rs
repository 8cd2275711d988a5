// src/encoder.rs

//! Mermaid flowchart encoding of a [`CommitSet`].
//!
//! Output depends only on the records and their iteration order, so the
//! same set always encodes to the same bytes.

use crate::model::{short_id, CommitRecord, CommitSet};
use std::collections::HashSet;
use std::fmt::Write;

pub const HEADER: &str = "graph TD";

/// Mermaid line-break marker appended to node labels
pub const LINE_BREAK: &str = "<br>";

const NODE_INDENT: &str = "    ";
const SUBGRAPH_INDENT: &str = "  ";

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One edge from each commit to the one listed before it
    Linear,
    /// Nodes grouped per branch, one edge per parent link
    Branches,
}

/// What to do with an edge whose parent was never declared as a node
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum DanglingPolicy {
    /// Leave the edge out
    #[default]
    Drop,
    /// Declare a placeholder node for the missing parent
    Stub,
    /// Emit the edge anyway and let the renderer invent the node
    Keep,
}

#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    pub layout: Layout,
    pub dangling: DanglingPolicy,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Linear,
            dangling: DanglingPolicy::default(),
        }
    }
}

pub fn encode(commits: &CommitSet, options: &EncodeOptions) -> String {
    let mut out = String::new();
    line(&mut out, "", HEADER);

    match options.layout {
        Layout::Linear => encode_linear(&mut out, commits),
        Layout::Branches => encode_branches(&mut out, commits, options.dangling),
    }

    tracing::debug!(layout = ?options.layout, bytes = out.len(), "encoded graph");
    out
}

/// Chains commits in extraction order. This approximates lineage: merges
/// and parallel branches collapse into a single line.
fn encode_linear(out: &mut String, commits: &CommitSet) {
    let mut previous: Option<&str> = None;

    for record in commits {
        let label = format!("{}{LINE_BREAK}", sanitize_label(&record.message));
        node(out, NODE_INDENT, &record.id, &label);
        if let Some(prev) = previous {
            edge(out, &record.id, prev);
        }
        previous = Some(record.id.as_str());
    }
}

fn encode_branches(out: &mut String, commits: &CommitSet, dangling: DanglingPolicy) {
    for (index, branch) in commits.branches().into_iter().enumerate() {
        line(
            out,
            SUBGRAPH_INDENT,
            &format!("subgraph branch_{index}[\"{}\"]", sanitize_label(branch)),
        );
        line(out, NODE_INDENT, "direction TB");
        for record in commits.iter().filter(|r| r.branch.as_deref() == Some(branch)) {
            branch_node(out, record);
        }
        line(out, SUBGRAPH_INDENT, "end");
    }

    for record in commits.iter().filter(|r| r.branch.is_none()) {
        branch_node(out, record);
    }

    if dangling == DanglingPolicy::Stub {
        let mut stubbed: HashSet<&str> = HashSet::new();
        for parent in commits.iter().flat_map(|r| &r.parents) {
            if !commits.contains(parent) && stubbed.insert(parent.as_str()) {
                node(out, NODE_INDENT, parent, &format!("({})", short_id(parent)));
            }
        }
    }

    for record in commits {
        for parent in &record.parents {
            if dangling == DanglingPolicy::Drop && !commits.contains(parent) {
                tracing::trace!(child = %record.id, %parent, "dropping edge to undeclared parent");
                continue;
            }
            edge(out, &record.id, parent);
        }
    }
}

fn branch_node(out: &mut String, record: &CommitRecord) {
    let label = format!(
        "{}{LINE_BREAK}({})",
        sanitize_label(&record.message),
        record.short_id()
    );
    node(out, NODE_INDENT, &record.id, &label);
}

fn node(out: &mut String, indent: &str, id: &str, label: &str) {
    line(out, indent, &format!("{id}[\"{label}\"]"));
}

fn edge(out: &mut String, child: &str, parent: &str) {
    line(out, NODE_INDENT, &format!("{child} --> {parent}"));
}

fn line(out: &mut String, indent: &str, text: &str) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{indent}{text}");
}

/// Makes free text safe to place between the quotes of a Mermaid label.
///
/// Characters that Mermaid treats as syntax are replaced with its entity
/// codes (`#quot;`, `#lt;`, ...), and line breaks and other control
/// characters become spaces.
pub fn sanitize_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '#' => out.push_str("#35;"),
            '"' => out.push_str("#quot;"),
            '<' => out.push_str("#lt;"),
            '>' => out.push_str("#gt;"),
            '[' | ']' | '{' | '}' | '(' | ')' | '|' | ';' | '`' => {
                let _ = write!(out, "#{};", u32::from(ch));
            }
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
