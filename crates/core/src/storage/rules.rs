//! Upload validation rules.
//!
//! Every backend runs these checks before any transport I/O is attempted,
//! so a rejected upload costs nothing.

use std::collections::HashSet;

use super::error::StorageError;

/// Size and extension policy for uploads, built once per backend from its
/// configuration.
#[derive(Debug, Clone)]
pub struct UploadRules {
    max_file_size: u64,
    allowed_extensions: HashSet<String>,
}

impl UploadRules {
    /// Creates upload rules from a configured limit and extension list.
    ///
    /// Extensions are normalized at construction: lowercased, with a
    /// leading dot ensured (`"PDF"` and `".pdf"` both become `".pdf"`).
    /// An explicit empty-string entry allows files without an extension.
    #[must_use]
    pub fn new(max_file_size: u64, allowed_extensions: &[String]) -> Self {
        let allowed_extensions = allowed_extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect();

        Self {
            max_file_size,
            allowed_extensions,
        }
    }

    /// Validates a candidate upload against the size and extension policy.
    ///
    /// The size is the client-declared size; it is not re-verified against
    /// the bytes actually read.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileTooLarge`] when `size` exceeds the
    /// configured maximum, or [`StorageError::ExtensionNotAllowed`] when
    /// the filename's extension is not in the allow-set.
    pub fn check(&self, filename: &str, size: u64) -> Result<(), StorageError> {
        if size > self.max_file_size {
            return Err(StorageError::file_too_large(size, self.max_file_size));
        }

        let extension = file_extension(filename).to_lowercase();
        if !self.allowed_extensions.contains(&extension) {
            return Err(StorageError::extension_not_allowed(extension));
        }

        Ok(())
    }

    /// The configured maximum file size in bytes.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }
}

/// Returns the extension of a filename, including the dot, with original
/// case preserved. A name without a dot yields the empty string.
pub(crate) fn file_extension(filename: &str) -> &str {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.is_empty() || ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
