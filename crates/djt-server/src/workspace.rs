use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use tower_lsp_server::ls_types;

/// Project root for settings lookup: the first workspace folder, falling back
/// to the current directory.
pub fn project_root(params: &ls_types::InitializeParams) -> Option<PathBuf> {
    let folder = params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .and_then(|folder| uri_to_path(&folder.uri));

    if let Some(path) = folder {
        tracing::debug!("Using workspace folder as project root: {}", path.display());
        return Some(path);
    }

    let current_dir = std::env::current_dir().ok();
    if current_dir.is_none() {
        tracing::warn!("No workspace folders and current directory unavailable");
    }
    current_dir
}

/// Converts a `file:` URI into a path; other schemes yield `None`.
pub fn uri_to_path(uri: &ls_types::Uri) -> Option<PathBuf> {
    if !uri.scheme().as_str().eq_ignore_ascii_case("file") {
        return None;
    }

    // Authority, query and fragment are not part of the path component
    let decoded = percent_decode_str(uri.path().as_str()).decode_utf8_lossy();

    #[cfg(windows)]
    let decoded = {
        // `/C:/...` → `C:/...`
        let path: &str = &decoded;
        std::borrow::Cow::Owned(path.strip_prefix('/').unwrap_or(path).to_string())
    };

    Some(PathBuf::from(decoded.as_ref()))
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::Path;

    use super::*;

    fn uri(text: &str) -> ls_types::Uri {
        text.parse().unwrap()
    }

    #[test]
    fn test_file_uri() {
        assert_eq!(
            uri_to_path(&uri("file:///srv/site/templates/base.html")).as_deref(),
            Some(Path::new("/srv/site/templates/base.html"))
        );
    }

    #[test]
    fn test_percent_encoded_uri() {
        assert_eq!(
            uri_to_path(&uri("file:///srv/my%20site/a.html")).as_deref(),
            Some(Path::new("/srv/my site/a.html"))
        );
    }

    #[test]
    fn test_authority_is_skipped() {
        assert_eq!(
            uri_to_path(&uri("file://localhost/srv/a.html")).as_deref(),
            Some(Path::new("/srv/a.html"))
        );
    }

    #[test]
    fn test_query_and_fragment_are_ignored() {
        assert_eq!(
            uri_to_path(&uri("file:///srv/a.html?v=1#frag")).as_deref(),
            Some(Path::new("/srv/a.html"))
        );
    }

    #[test]
    fn test_single_slash_form() {
        assert_eq!(
            uri_to_path(&uri("file:/srv/a.html")).as_deref(),
            Some(Path::new("/srv/a.html"))
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(
            uri_to_path(&uri("FILE:///srv/a.html")).as_deref(),
            Some(Path::new("/srv/a.html"))
        );
    }

    #[test]
    fn test_non_file_scheme() {
        assert_eq!(uri_to_path(&uri("untitled:Untitled-1")), None);
    }

    #[test]
    fn test_project_root_prefers_workspace_folder() {
        let params = ls_types::InitializeParams {
            workspace_folders: Some(vec![ls_types::WorkspaceFolder {
                uri: uri("file:///workspace/project"),
                name: "project".to_string(),
            }]),
            ..Default::default()
        };
        assert_eq!(
            project_root(&params).as_deref(),
            Some(Path::new("/workspace/project"))
        );
    }

    #[test]
    fn test_project_root_falls_back_to_current_dir() {
        let params = ls_types::InitializeParams::default();
        assert_eq!(project_root(&params), std::env::current_dir().ok());
    }
}
