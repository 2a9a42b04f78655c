use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::reconcile::{KEY_SEPARATOR, delete_key_path, flatten_keys};
use crate::core::{MessageContext, MessageLocation};

/// Extension of locale message documents.
pub const MESSAGE_FORMAT: &str = "json";

/// Path of the document for `locale` inside `messages_dir`.
///
/// ```
/// use std::path::Path;
/// use keyscan::core::parsers::json::message_file_path;
///
/// assert_eq!(
///     message_file_path(Path::new("src/messages"), "en"),
///     Path::new("src/messages/en.json")
/// );
/// ```
pub fn message_file_path(messages_dir: &Path, locale: &str) -> PathBuf {
    messages_dir.join(format!("{}.{}", locale, MESSAGE_FORMAT))
}

/// List every locale document in the messages directory, sorted by path.
pub fn locale_files(messages_dir: &Path) -> Result<Vec<PathBuf>> {
    if !messages_dir.is_dir() {
        bail!(
            "Messages directory '{}' does not exist.\n\
             Hint: pass --directory or set 'messagesDirectory' in .keyscanrc.json.",
            messages_dir.display()
        );
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(messages_dir)
        .with_context(|| format!("Failed to read directory: {}", messages_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some(MESSAGE_FORMAT) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// A hierarchical locale document loaded from disk.
///
/// Keeps the original text around so key locations can be reported, and the
/// parsed value so keys can be flattened or removed. Output is always
/// pretty-printed with 2-space indentation.
#[derive(Debug)]
pub struct MessageDocument {
    file_path: PathBuf,
    content: String,
    value: Value,
}

impl MessageDocument {
    /// Open and parse a JSON document.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
        Self::from_content(path, content)
    }

    pub fn from_content(path: &Path, content: String) -> Result<Self> {
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;
        if !value.is_object() {
            bail!(
                "Expected a JSON object at the top level of {}",
                path.display()
            );
        }
        Ok(Self {
            file_path: path.to_path_buf(),
            content,
            value,
        })
    }

    /// All defined keys as dot-paths.
    pub fn keys(&self) -> BTreeSet<String> {
        flatten_keys(&self.value)
    }

    /// Where `key` is defined in this document, for reporting.
    pub fn context_for(&self, key: &str) -> MessageContext {
        let line_index = build_line_index(&self.content);
        let line = find_key_line(&self.content, key, &line_index);
        MessageContext::new(
            MessageLocation::with_line(self.file_path.to_string_lossy(), line),
            key,
        )
    }

    /// Delete keys by their full key paths (e.g., "common.unused").
    ///
    /// Emptied parent objects are pruned. Paths absent from this document are
    /// skipped, and so are paths that name an object here: a locale that nests
    /// messages under a key the source locale holds as a leaf keeps them.
    /// Returns the number of keys actually removed.
    pub fn delete_keys<'k>(&mut self, key_paths: impl IntoIterator<Item = &'k str>) -> usize {
        let before = flatten_keys(&self.value).len();
        for key_path in key_paths {
            if lookup(&self.value, key_path).is_some_and(|target| !target.is_object()) {
                delete_key_path(&mut self.value, key_path);
            }
        }
        before - flatten_keys(&self.value).len()
    }

    /// Serialize the current value the way it will be written to disk.
    pub fn render(&self) -> Result<String> {
        let mut content =
            serde_json::to_string_pretty(&self.value).context("Failed to serialize JSON")?;
        content.push('\n');
        Ok(content)
    }

    /// Save the document back to its file.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.file_path, self.render()?)
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))
    }
}

/// Value stored under a dot-separated key path.
fn lookup<'v>(value: &'v Value, key_path: &str) -> Option<&'v Value> {
    key_path
        .split(KEY_SEPARATOR)
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Build an index of line start byte offsets for O(log n) line lookups.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0]; // Line 1 starts at offset 0
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search (1-based).
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Find the line number where a key appears in the JSON content.
///
/// Searches for each key part in sequence so that `common.submit` finds the
/// `"submit"` that comes after `"common"`, and only accepts matches followed by
/// a colon (keys, not values).
fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let mut search_start = 0;
    for part in key_path.split('.') {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();

            if remaining[after_pattern..].trim_start().starts_with(':') {
                search_start += after_pattern;
                found = true;
                break;
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        offset_to_line(line_index, search_start)
    } else {
        1
    }
}
