//! Files around the open note: scanning for wikilink targets, reading and
//! writing buffers.

use livemark_engine::resolve_wikilink;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Invalid wikilink target '{0}'")]
    InvalidTarget(String),
}

/// Where an activated wikilink leads.
#[derive(Debug, PartialEq, Eq)]
pub enum LinkTarget {
    Existing(PathBuf),
    /// No such note yet; it is created when the buffer is saved.
    New(PathBuf),
}

pub fn read_file(path: &Path) -> Result<String, NotesError> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<(), NotesError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::write(path, content)?)
}

/// Writes a new note for wikilink `target`, starting with its title heading.
pub fn create_note(path: &Path, target: &str) -> Result<String, NotesError> {
    let content = format!("# {}\n\n", target.trim());
    write_file(path, &content)?;
    Ok(content)
}

/// All `.md` files under `notes_root`, relative to it and sorted.
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<RelativePathBuf>, NotesError> {
    if !notes_root.is_dir() {
        return Err(NotesError::InvalidNotesDir(format!(
            "{} is not a directory",
            notes_root.display()
        )));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    root: &Path,
    dir: &Path,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), NotesError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            scan_directory_recursive(root, &path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
            && let Some(relative) = path
                .strip_prefix(root)
                .ok()
                .and_then(|p| RelativePathBuf::from_path(p).ok())
        {
            files.push(relative);
        }
    }

    Ok(())
}

/// Resolves `target` among the notes under `notes_root`, falling back to the
/// path a new note for it would get.
pub fn resolve_target(notes_root: &Path, target: &str) -> Result<LinkTarget, NotesError> {
    let files: Vec<String> = scan_markdown_files(notes_root)?
        .iter()
        .map(|p| p.as_str().to_string())
        .collect();

    match resolve_wikilink(target, &files) {
        Some(found) => Ok(LinkTarget::Existing(
            RelativePath::new(found).to_path(notes_root),
        )),
        None => new_note_path(notes_root, target).map(LinkTarget::New),
    }
}

/// `notes_root/<target>.md`; targets may not climb out of the root.
pub fn new_note_path(notes_root: &Path, target: &str) -> Result<PathBuf, NotesError> {
    let target = target.trim();
    let file = if target.to_lowercase().ends_with(".md") {
        target.to_string()
    } else {
        format!("{target}.md")
    };
    let relative = RelativePath::new(&file).normalize();

    if target.is_empty() || relative.as_str().starts_with("..") {
        return Err(NotesError::InvalidTarget(target.to_string()));
    }
    Ok(relative.to_path(notes_root))
}
