use std::path::{Path, PathBuf};

use internship_journey::config::JourneyConfig;
use internship_journey::journey::{
    ApplicationIdSource, CandidateCatalog, CatalogError, FileReference, Filter, ResumeRef,
    SortKey,
};
use tracing::info;

/// Deterministic id suffix for reproducible demo output.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedSuffix(pub(crate) u16);

impl ApplicationIdSource for FixedSuffix {
    fn suffix(&self) -> u16 {
        self.0
    }
}

/// The command-line override wins over `JOURNEY_CATALOG_PATH`; the built-in catalog is used
/// when neither is set.
pub(crate) fn load_catalog(
    config: &JourneyConfig,
    path: Option<PathBuf>,
) -> Result<CandidateCatalog, CatalogError> {
    match path.or_else(|| config.catalog_path.clone()) {
        Some(path) => CandidateCatalog::from_path(path),
        None => {
            info!("using built-in candidate catalog");
            Ok(CandidateCatalog::standard())
        }
    }
}

/// Describes a file the way a picker would: display name, guessed MIME type and a handle.
pub(crate) fn file_reference(path: &Path) -> FileReference {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let declared_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    FileReference {
        name,
        declared_type,
        handle: ResumeRef(format!("file://{}", path.display())),
    }
}

/// Like [`file_reference`] but requires the file to exist.
pub(crate) fn pick_file(path: &Path) -> Result<FileReference, std::io::Error> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is not a file", path.display()),
        ));
    }
    Ok(file_reference(path))
}

pub(crate) fn parse_filter(raw: &str) -> Result<Filter, String> {
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let filter = match normalized.as_str() {
        "all" => Filter::All,
        "best_match" | "best" => Filter::BestMatch,
        "remote" => Filter::Remote,
        "delhi_ncr" | "delhi" => Filter::DelhiNcr,
        "part_time" => Filter::PartTime,
        _ => Filter::from_label(raw),
    };
    Ok(filter)
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortKey, String> {
    Ok(SortKey::from_label(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_pdf_from_extension() {
        let reference = file_reference(Path::new("/tmp/uploads/Asha CV.pdf"));
        assert_eq!(reference.name, "Asha CV.pdf");
        assert_eq!(reference.declared_type, "application/pdf");
        assert_eq!(reference.handle.0, "file:///tmp/uploads/Asha CV.pdf");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        let reference = file_reference(Path::new("resume"));
        assert_eq!(reference.declared_type, "application/octet-stream");
    }

    #[test]
    fn filters_accept_names_and_labels() {
        assert_eq!(parse_filter("part-time"), Ok(Filter::PartTime));
        assert_eq!(parse_filter("Delhi NCR"), Ok(Filter::DelhiNcr));
        assert_eq!(parse_filter("best_match"), Ok(Filter::BestMatch));
        assert_eq!(parse_filter("weekends"), Ok(Filter::All));
        assert_eq!(parse_sort("stipend"), Ok(SortKey::Stipend));
    }
}
