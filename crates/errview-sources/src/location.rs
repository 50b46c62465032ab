use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl SourceLocation {
    /// Interpret a user-supplied location.
    ///
    /// An existing local path always wins; otherwise `http://` and `https://`
    /// strings are URLs and everything else is treated as a (possibly missing)
    /// file.
    pub fn resolve(location: &str) -> Self {
        let path = Path::new(location);
        if path.exists() {
            return SourceLocation::File(path.to_path_buf());
        }

        if location.starts_with("http://") || location.starts_with("https://") {
            SourceLocation::Url(location.to_string())
        } else {
            SourceLocation::File(path.to_path_buf())
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, SourceLocation::Url(_))
    }

    /// Replace a `{workflow}` placeholder in the location.
    pub fn for_workflow(template: &str, workflow: &str) -> Self {
        Self::resolve(&template.replace("{workflow}", workflow))
    }

    /// Expand a directory into the `.json` files directly inside it, sorted by
    /// file name. Files and URLs expand to themselves.
    pub fn expand(&self) -> Result<Vec<SourceLocation>> {
        let dir = match self {
            SourceLocation::File(path) if path.is_dir() => path,
            _ => return Ok(vec![self.clone()]),
        };

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| Error::unavailable(dir.display(), e))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(SourceLocation::File(path.to_path_buf()));
            }
        }

        Ok(files)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => write!(f, "{}", url),
        }
    }
}
