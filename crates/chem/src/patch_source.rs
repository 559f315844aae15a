//! patches that are written as json
//!
//! Besides attribute paths (see [crate::path]) a patch can be provided as a json object,
//! either from a file or typed into an editor. In both cases the input has to be valid json
//! and has to start at the document root, e.g. `{"default_attributes": {...}}`.
use crate::value::{Object, Value};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Written to the temporary file before the editor opens
pub const EDITOR_TEMPLATE: &str = "# Lines starting with '#' will be ignored\n\
# Please provide a full path, aka you\n\
# want to start from \"default_attributes\": {...}\n\n";

const DEFAULT_EDITOR: &str = "vi";

/// Read a json patch from a file
pub fn from_file(file_path: &Path) -> Result<Object, PatchSourceError> {
    tracing::info!(path=%file_path.display(), "loading patch file");

    let contents = std::fs::read_to_string(file_path).map_err(|source| PatchSourceError::Io {
        path: file_path.to_owned(),
        source,
    })?;
    parse_patch(&contents)
}

/// Let the user write a patch in `$EDITOR`
pub fn from_editor() -> Result<Object, PatchSourceError> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string());
    from_editor_command(&editor)
}

/// Open `editor` on a temporary file prefilled with [EDITOR_TEMPLATE]
///
/// `editor` may contain arguments, e.g. `code --wait`.
pub fn from_editor_command(editor: &str) -> Result<Object, PatchSourceError> {
    let mut words = editor.split_whitespace();
    let program = words.next().ok_or(PatchSourceError::NoEditor)?;

    let mut file = tempfile::Builder::new()
        .prefix("chem-")
        .suffix(".tmp")
        .tempfile()
        .map_err(PatchSourceError::TempFile)?;
    file.write_all(EDITOR_TEMPLATE.as_bytes())
        .and_then(|_| file.flush())
        .map_err(PatchSourceError::TempFile)?;

    tracing::debug!(%editor, path=%file.path().display(), "starting editor");
    let status = std::process::Command::new(program)
        .args(words)
        .arg(file.path())
        .status()
        .map_err(|source| PatchSourceError::EditorSpawn {
            editor: editor.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(PatchSourceError::EditorFailed {
            editor: editor.to_string(),
            status,
        });
    }

    // editors may replace the file instead of writing into it, so read it by path
    let contents =
        std::fs::read_to_string(file.path()).map_err(|source| PatchSourceError::Io {
            path: file.path().to_owned(),
            source,
        })?;

    parse_patch(&strip_comments(&contents))
}

/// Drop `#` lines and join the remaining trimmed lines
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .collect()
}

/// Validate `text` as a json object
pub fn parse_patch(text: &str) -> Result<Object, PatchSourceError> {
    match serde_json::from_str(text)? {
        Value::Object(patch) => Ok(patch),
        other => Err(PatchSourceError::NotAnObject(other.kind())),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PatchSourceError {
    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to prepare temporary file for the editor")]
    TempFile(#[source] std::io::Error),
    #[error("No editor configured")]
    NoEditor,
    #[error("Unable to start editor `{editor}`")]
    EditorSpawn {
        editor: String,
        source: std::io::Error,
    },
    #[error("Editor `{editor}` exited with {status}")]
    EditorFailed {
        editor: String,
        status: std::process::ExitStatus,
    },
    #[error("Provided JSON data has syntax error(s)")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Provided JSON data must be an object, found {0}")]
    NotAnObject(&'static str),
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn comments_are_stripped() {
        let text = format!("{EDITOR_TEMPLATE}{{\n  \"default_attributes\": {{\n    \"x\": 1\n  }}\n}}\n");
        assert_eq!(strip_comments(&text), r#"{"default_attributes": {"x": 1}}"#);
    }

    #[test]
    fn patch_must_be_an_object() {
        let patch = parse_patch(r#"{"a":{"b":[1,2]}}"#).unwrap();
        assert_eq!(patch.keys().collect::<Vec<_>>(), ["a"]);

        assert!(matches!(
            parse_patch("[1, 2]"),
            Err(PatchSourceError::NotAnObject("array"))
        ));
        assert!(matches!(
            parse_patch(r#"{"a": "#),
            Err(PatchSourceError::InvalidJson(_))
        ));
    }

    #[test]
    fn patch_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tags": ["b"], "name": "prod"}}"#).unwrap();

        let patch = from_file(file.path()).unwrap();
        assert_eq!(patch.keys().collect::<Vec<_>>(), ["tags", "name"]);
    }

    #[test]
    fn untouched_editor_template_is_invalid() {
        // `true` leaves the template as is
        assert!(matches!(
            from_editor_command("true"),
            Err(PatchSourceError::InvalidJson(_))
        ));
    }

    #[test]
    fn failing_editor_is_reported() {
        assert!(matches!(
            from_editor_command("false"),
            Err(PatchSourceError::EditorFailed { .. })
        ));
        assert!(matches!(
            from_editor_command("   "),
            Err(PatchSourceError::NoEditor)
        ));
    }
}
