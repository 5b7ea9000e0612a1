//! Deterministic tool names for reflected members

/// Build a tool name from a package and a member qualname.
///
/// Structural separators (whitespace, `.`, `/`, `\`, `:`, `-`) become `_` so
/// the result is safe as an external identifier and stable across rebuilds.
///
/// ```
/// use bridge_domain::method::naming::tool_name;
/// assert_eq!(tool_name("github", "Github.get_user"), "github_Github_get_user");
/// assert_eq!(tool_name("azure.storage.blob", "upload"), "azure_storage_blob_upload");
/// ```
pub fn tool_name(package: &str, qualname: &str) -> String {
    format!("{}.{}", package, qualname)
        .chars()
        .map(|c| match c {
            '.' | '/' | '\\' | ':' | '-' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

/// Private members (leading underscore) are never exposed
pub fn is_public(name: &str) -> bool {
    !name.starts_with('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_replaces_separators() {
        assert_eq!(tool_name("pkg", "fn"), "pkg_fn");
        assert_eq!(tool_name("my pkg", "Client.do thing"), "my_pkg_Client_do_thing");
        assert_eq!(tool_name("a/b", "c::d"), "a_b_c__d");
        assert_eq!(tool_name("google-cloud", "list"), "google_cloud_list");
    }

    #[test]
    fn test_tool_name_is_stable() {
        assert_eq!(
            tool_name("kubernetes", "CoreV1Api.list_namespace"),
            tool_name("kubernetes", "CoreV1Api.list_namespace")
        );
    }

    #[test]
    fn test_is_public() {
        assert!(is_public("get_user"));
        assert!(!is_public("_requester"));
        assert!(!is_public("__init__"));
    }
}
