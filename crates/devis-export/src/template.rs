use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ExportError;

/// Load the document template from disk.
///
/// The template never changes at runtime, so callers load it once at
/// startup and cache it process-wide.
pub fn load_template(path: &Path) -> Result<String, ExportError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ExportError::TemplateNotFound(path.display().to_string())
        } else {
            ExportError::Io(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_is_a_named_error() {
        let err = load_template(Path::new("/nonexistent/template.html")).unwrap_err();
        assert!(matches!(err, ExportError::TemplateNotFound(_)));
    }
}
