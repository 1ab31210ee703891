use std::path::{Component, Path};
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 8;

/// Generates a new unique storage name.
///
/// The extension of the original file name is kept if it looks sane,
/// e.g. `photo.PNG` becomes `<uuid>.png`.
pub fn generate_storage_name(original_name: Option<&str>) -> String {
    let id = Uuid::new_v4().simple().to_string();

    match original_name.and_then(file_extension) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id,
    }
}

fn file_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}

/// Checks that the name refers to a single file directly in its
/// parent directory.
pub fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name,
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use super::*;

    #[test]
    fn test_keeps_extension() {
        let name = generate_storage_name(Some("photo.PNG"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), 32 + ".png".len());
    }

    #[test]
    fn test_drops_odd_extensions() {
        assert!(!generate_storage_name(Some("archive.tar.gz!")).contains('.'));
        assert!(!generate_storage_name(Some("no-extension")).contains('.'));
        assert!(!generate_storage_name(Some("weird.extensionistoolong")).contains('.'));
        assert!(!generate_storage_name(None).contains('.'));
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<String> = (0..1_000)
            .map(|_| generate_storage_name(Some("a.jpeg")))
            .collect();

        assert_eq!(names.len(), 1_000);
    }

    #[test]
    fn test_plain_names() {
        assert!(is_plain_name("abc123.png"));
        assert!(is_plain_name("abc123"));

        assert!(!is_plain_name(""));
        assert!(!is_plain_name("."));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name("../secret"));
        assert!(!is_plain_name("nested/file.png"));
        assert!(!is_plain_name("/etc/passwd"));
        assert!(!is_plain_name("./abc.png"));
    }
}
