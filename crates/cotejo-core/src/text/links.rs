//! Pulls Drive folder, file and sheet references out of mail text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{RefKind, SheetRef};

/// Recognized link shapes. Folders come first so a folder scan happens
/// before any single-file fallback pointing into the same place.
static LINK_PATTERNS: LazyLock<Vec<(RefKind, Regex)>> = LazyLock::new(|| {
    vec![
        (
            RefKind::Folder,
            Regex::new(r"https?://drive\.google\.com/drive(?:/u/\d+)?/folders/([a-zA-Z0-9_-]+)")
                .unwrap(),
        ),
        (
            RefKind::File,
            Regex::new(r"https?://drive\.google\.com(?:/u/\d+)?/file/d/([a-zA-Z0-9_-]+)").unwrap(),
        ),
        (
            RefKind::File,
            Regex::new(r"https?://drive\.google\.com(?:/u/\d+)?/open\?id=([a-zA-Z0-9_-]+)")
                .unwrap(),
        ),
        (
            RefKind::Sheet,
            Regex::new(r"https?://docs\.google\.com(?:/u/\d+)?/spreadsheets/d/([a-zA-Z0-9_-]+)")
                .unwrap(),
        ),
    ]
});

/// Collects every Drive reference in `text`, deduplicated by id. Results
/// are grouped by link shape in the order of `LINK_PATTERNS`, so folders
/// always precede plain files and sheets.
pub fn extract_sheet_refs(text: &str) -> Vec<SheetRef> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut refs = Vec::new();
    for (kind, pattern) in LINK_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            if let Some(id) = caps.get(1) {
                if seen.insert(id.as_str()) {
                    refs.push(SheetRef::new(*kind, id.as_str()));
                }
            }
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_link() {
        let refs = extract_sheet_refs(
            "revisar https://drive.google.com/drive/folders/1AbC_dE-f23 por favor",
        );
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind, RefKind::Folder);
        assert_eq!(refs[0].id, "1AbC_dE-f23");
    }

    #[test]
    fn test_user_scoped_links() {
        let refs = extract_sheet_refs(
            "https://drive.google.com/drive/u/0/folders/AAA y \
             https://drive.google.com/u/2/file/d/BBB/view",
        );
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, RefKind::Folder);
        assert_eq!(refs[0].id, "AAA");
        assert_eq!(refs[1].kind, RefKind::File);
        assert_eq!(refs[1].id, "BBB");
    }

    #[test]
    fn test_open_id_and_sheet_links() {
        let refs = extract_sheet_refs(
            "https://drive.google.com/open?id=FILE9 junto a \
             https://docs.google.com/spreadsheets/d/SHEET7/edit#gid=0",
        );
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, RefKind::File);
        assert_eq!(refs[0].id, "FILE9");
        assert_eq!(refs[1].kind, RefKind::Sheet);
        assert_eq!(refs[1].id, "SHEET7");
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let refs = extract_sheet_refs(
            "https://drive.google.com/file/d/SAME1/view y de nuevo \
             https://drive.google.com/open?id=SAME1",
        );
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind, RefKind::File);
        assert_eq!(refs[0].id, "SAME1");
    }

    #[test]
    fn test_folders_listed_before_files() {
        // The file link appears first in the text but the folder wins the
        // scan order.
        let refs = extract_sheet_refs(
            "adjunto https://drive.google.com/file/d/F1/view dentro de \
             https://drive.google.com/drive/folders/D1",
        );
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, RefKind::Folder);
        assert_eq!(refs[1].kind, RefKind::File);
    }

    #[test]
    fn test_no_links() {
        assert!(extract_sheet_refs("sin enlaces en este correo").is_empty());
    }
}
