//! Flowchart export of fitted trees
//!
//! Produces Mermaid `graph TD` text: one statement per node and per edge.
//! Node ids are `root` followed by `L`/`R` for each step down the tree.

use crate::core::{ClassifyError, Result};
use crate::tree::{DecisionTree, Node};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

impl DecisionTree {
    /// Render the fitted tree as flowchart text
    pub fn to_flowchart(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_flowchart(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| ClassifyError::SerializationError(e.to_string()))
    }

    /// Write the flowchart to any writer
    pub fn write_flowchart<W: Write>(&self, writer: &mut W) -> Result<()> {
        let root = self.root().ok_or(ClassifyError::ModelNotTrained)?;
        writeln!(writer, "graph TD")?;
        write_node(writer, root, "root")
    }

    /// Write the flowchart to a file, replacing it if present
    pub fn save_flowchart<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_flowchart(&mut writer)?;
        writer.flush()?;
        info!("Flowchart saved to {path:?}");
        Ok(())
    }
}

fn write_node<W: Write>(writer: &mut W, node: &Node, id: &str) -> Result<()> {
    match node {
        Node::Leaf { label } => {
            writeln!(writer, "{id}[\"Class: {label}\"]")?;
        }
        Node::Internal {
            feature,
            threshold,
            left,
            right,
        } => {
            let left_id = format!("{id}L");
            let right_id = format!("{id}R");
            writeln!(writer, "{id}[\"Feature {feature} <= {threshold:.2}\"]")?;
            writeln!(writer, "{id} -->|True| {left_id}")?;
            writeln!(writer, "{id} -->|False| {right_id}")?;
            write_node(writer, left, &left_id)?;
            write_node(writer, right, &right_id)?;
        }
    }
    Ok(())
}
