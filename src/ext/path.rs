use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide the conversions templet needs when
/// matching and naming template files.
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use templet::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Returns the extension of the final path element including its leading
    /// dot, or an empty slice when the element has no dot.
    ///
    /// The extension is taken from the raw bytes of the file name, so a name
    /// that is not valid UTF-8 still has one. Unlike [`Path::extension`], a
    /// dotfile such as `.bashrc` has the extension `.bashrc`.
    ///
    /// # Examples
    /// ```
    /// use templet::ext::PathExt;
    /// use std::path::Path;
    ///
    /// assert_eq!(Path::new("views/index.html").dotted_extension(), b".html");
    /// assert!(Path::new("Makefile").dotted_extension().is_empty());
    /// ```
    fn dotted_extension(&self) -> &[u8];

    /// The name a template file is registered under: its final path element.
    fn template_name(&self) -> Result<&str>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn dotted_extension(&self) -> &[u8] {
        let Some(file_name) = self.file_name() else {
            return &[];
        };
        let bytes = file_name.as_encoded_bytes();
        match bytes.iter().rposition(|b| *b == b'.') {
            Some(idx) => &bytes[idx..],
            None => &[],
        }
    }

    fn template_name(&self) -> Result<&str> {
        let file_name = self.file_name().ok_or_else(|| {
            Error::Other(anyhow::anyhow!("Path '{}' has no file name", self.display()))
        })?;
        Path::new(file_name).to_str_checked()
    }
}
