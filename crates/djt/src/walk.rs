use camino::Utf8Path;
use camino::Utf8PathBuf;
use ignore::WalkBuilder;

const TEMPLATE_EXTENSIONS: &[&str] = &["html", "htm", "djhtml"];

pub fn is_template(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| TEMPLATE_EXTENSIONS.contains(&ext))
}

/// Expand the given paths into the template files to process.
///
/// Files are kept as given whatever their extension. Directories are walked
/// recursively for templates, skipping hidden entries and anything
/// `.gitignore` excludes. The result is sorted and deduplicated.
pub fn template_files(paths: &[Utf8PathBuf]) -> Vec<Utf8PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkBuilder::new(path.as_std_path()).build().filter_map(Result::ok) {
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let Some(utf8) = Utf8Path::from_path(entry.path()) else {
                tracing::warn!("Skipping non-UTF-8 path {}", entry.path().display());
                continue;
            };
            if is_template(utf8) {
                files.push(utf8.to_owned());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(files: &[Utf8PathBuf]) -> Vec<&str> {
        files.iter().filter_map(|p| p.file_name()).collect()
    }

    #[test]
    fn test_directory_yields_templates_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        std::fs::create_dir_all(dir.path().join("partials")).unwrap();
        std::fs::write(dir.path().join("page.html"), "<h1>hi</h1>").unwrap();
        std::fs::write(dir.path().join("partials/nav.djhtml"), "<nav></nav>").unwrap();
        std::fs::write(dir.path().join("views.py"), "pass").unwrap();

        let files = template_files(&[root]);
        assert_eq!(names(&files), vec!["page.html", "nav.djhtml"]);
    }

    #[test]
    fn test_hidden_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        std::fs::create_dir_all(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join(".cache/old.html"), "<p></p>").unwrap();
        std::fs::write(dir.path().join("visible.html"), "<p></p>").unwrap();

        assert_eq!(names(&template_files(&[root])), vec!["visible.html"]);
    }

    #[test]
    fn test_explicit_files_are_kept() {
        let files = template_files(&[
            Utf8PathBuf::from("notes.txt"),
            Utf8PathBuf::from("-"),
            Utf8PathBuf::from("notes.txt"),
        ]);
        assert_eq!(files, vec![Utf8PathBuf::from("-"), Utf8PathBuf::from("notes.txt")]);
    }
}
