use std::path::PathBuf;

use haven_config::config;
use haven_result::{create_error, Result};
use ulid::Ulid;

/// MIME type prefixes accepted for evidence attachments
pub const ALLOWED_TYPE_PREFIXES: [&str; 2] = ["image/", "video/"];

/// Check whether a MIME type is allow-listed for evidence
pub fn is_allowed_type(content_type: &str) -> bool {
    ALLOWED_TYPE_PREFIXES
        .iter()
        .any(|prefix| content_type.starts_with(prefix))
}

/// Derive a file extension from a MIME type's subtype
///
/// Suffixed subtypes keep only their base, e.g. `image/svg+xml` maps to `svg`.
pub fn file_extension(content_type: &str) -> &str {
    let subtype = content_type
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or(content_type);

    subtype.split_once('+').map(|(base, _)| base).unwrap_or(subtype)
}

/// Rewrite a stored reference to forward slashes for cross-platform display
pub fn normalize_separators(reference: &str) -> String {
    reference.replace('\\', "/")
}

/// Allocate a destination for an evidence upload
///
/// Validates the MIME type against the allow-list, makes sure the configured
/// upload directory exists and returns the destination path together with the
/// reference under which the file should be recorded.
pub async fn prepare_destination(content_type: &str) -> Result<(PathBuf, String)> {
    if !is_allowed_type(content_type) {
        return Err(create_error!(FileTypeNotAllowed));
    }

    let config = config().await;

    let directory = PathBuf::from(&config.files.upload_dir);
    tokio::fs::create_dir_all(&directory)
        .await
        .map_err(|_| create_error!(InternalError))?;

    let file_name = format!("{}.{}", Ulid::new(), file_extension(content_type));
    let destination = directory.join(&file_name);

    let reference = normalize_separators(&format!(
        "{}/{}",
        config.files.upload_dir.trim_end_matches(['/', '\\']),
        file_name
    ));

    Ok((destination, reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_images_and_videos() {
        assert!(is_allowed_type("image/png"));
        assert!(is_allowed_type("image/jpeg"));
        assert!(is_allowed_type("video/mp4"));

        assert!(!is_allowed_type("text/plain"));
        assert!(!is_allowed_type("application/pdf"));
        assert!(!is_allowed_type("imagination/png"));
    }

    #[test]
    fn extension_derived_from_subtype() {
        assert_eq!(file_extension("image/png"), "png");
        assert_eq!(file_extension("video/mp4"), "mp4");
        assert_eq!(file_extension("image/svg+xml"), "svg");
    }

    #[test]
    fn references_use_forward_slashes() {
        assert_eq!(
            normalize_separators("uploads\\evidence.png"),
            "uploads/evidence.png"
        );
        assert_eq!(
            normalize_separators("uploads/evidence.png"),
            "uploads/evidence.png"
        );
    }
}
