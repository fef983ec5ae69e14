use crate::{
    errors::PathError,
    manifest::Manifest,
    paths::{normalize_relative, resolve_file_within, resolve_within},
};
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

type Shared = Rc<RefCell<Node>>;

#[derive(Debug)]
struct Node {
    name: String,
    is_file: bool,
    children: Vec<Shared>,
}
impl Node {
    fn shared(name: String, is_file: bool) -> Shared {
        Rc::new(RefCell::new(Self {
            name,
            is_file,
            children: Vec::new(),
        }))
    }
}

/// Shape of the tree a manifest produces, keyed by path relative to the root.
struct Outline {
    root: Shared,
    nodes: HashMap<PathBuf, Shared>,
    directories: usize,
    files: usize,
}
impl Outline {
    fn new(root_name: String) -> Self {
        let root = Node::shared(root_name, false);
        let mut nodes = HashMap::new();
        nodes.insert(PathBuf::new(), Rc::clone(&root));

        Self {
            root,
            nodes,
            directories: 0,
            files: 0,
        }
    }

    /// Links `relative` under its parent, adding directory nodes for implied parents.
    fn insert(&mut self, relative: &Path, is_file: bool) {
        let components: Vec<_> = relative.components().collect();
        let mut current = PathBuf::new();

        for (index, component) in components.iter().enumerate() {
            let parent = current.clone();
            current.push(component);

            if self.nodes.contains_key(&current) {
                continue;
            }

            let leaf_is_file = is_file && index + 1 == components.len();
            let name = component.as_os_str().to_string_lossy().to_string();
            let node = Node::shared(name, leaf_is_file);

            if leaf_is_file {
                self.files += 1;
            } else {
                self.directories += 1;
            }

            if let Some(parent) = self.nodes.get(&parent) {
                parent.borrow_mut().children.push(Rc::clone(&node));
            }

            self.nodes.insert(current.clone(), node);
        }
    }
}

/// Validates every entry the way the materializer does, then lays out the tree.
fn outline(manifest: &Manifest) -> Result<Outline, PathError> {
    let root = &manifest.root;
    let root_name = root
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());

    let mut outline = Outline::new(root_name);

    for entry in &manifest.directories.0 {
        resolve_within(root, entry)?;
        outline.insert(&normalize_relative(entry)?, false);
    }

    for entry in manifest.files.0.keys() {
        resolve_file_within(root, entry)?;
        outline.insert(&normalize_relative(entry)?, true);
    }

    Ok(outline)
}

fn draw(out: &mut String, node: &Shared, indent: &str, is_last: bool) {
    let node = node.borrow();

    let branch = if is_last { "└── " } else { "├── " };
    let label = if node.is_file {
        node.name.green()
    } else {
        node.name.blue()
    };
    let _ = writeln!(out, "{}{}", format!("{}{}", indent, branch).yellow(), label);

    let nested = format!("{}{}", indent, if is_last { "    " } else { "│   " });
    let count = node.children.len();

    for (position, child) in node.children.iter().enumerate() {
        draw(out, child, &nested, position + 1 == count);
    }
}

/// Renders the manifest as an ASCII tree rooted at its destination.
///
/// Fails on the first entry the materializer would refuse, so an approved preview
/// never stops halfway on a path error.
pub fn render_tree(manifest: &Manifest) -> Result<String, PathError> {
    let outline = outline(manifest)?;

    let mut out = String::new();
    draw(&mut out, &outline.root, "", true);

    Ok(out)
}

/// The tree headed by a colour key and a count of the distinct directories and files.
pub fn render_preview(manifest: &Manifest) -> Result<String, PathError> {
    let outline = outline(manifest)?;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({} directories, {} files)",
        "┌─".bold().bright_blue(),
        manifest.root.display().to_string().bold(),
        outline.directories,
        outline.files
    );
    let _ = writeln!(
        out,
        "{} {} {}\n",
        "│".bright_blue(),
        "directories".blue(),
        "files".green()
    );
    draw(&mut out, &outline.root, "", true);

    Ok(out)
}

pub fn preview_as_tree(manifest: &Manifest) -> Result<(), PathError> {
    print!("{}", render_preview(manifest)?);

    Ok(())
}
