//! Library icon resolution.
//!
//! Manifests name icons symbolically (`"icon": "ic_okhttp"`) or by URL. A
//! name is turned into something renderable by an [`IconResolver`] supplied
//! by the embedding application.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

/// The icon resolved for a library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Icon {
    /// The manifest declared no icon.
    None,
    /// A remote image the presentation layer should fetch itself.
    Url(String),
    /// A handle produced by the [`IconResolver`].
    Resource(String),
    /// An icon was declared but the resolver did not know it.
    Placeholder,
}

/// Maps an icon name to a renderable handle.
pub trait IconResolver: Send + Sync {
    fn icon_for(&self, name: &str) -> Option<String>;
}

impl<F> IconResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn icon_for(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Resolves nothing; every declared icon becomes [`Icon::Placeholder`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIcons;

impl IconResolver for NoIcons {
    fn icon_for(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Resolves icons from an in-memory name → handle map.
#[derive(Clone, Debug, Default)]
pub struct MapIcons {
    icons: HashMap<String, String>,
}

impl MapIcons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, handle: impl Into<String>) -> &mut Self {
        self.icons.insert(name.into(), handle.into());
        self
    }
}

impl IconResolver for MapIcons {
    fn icon_for(&self, name: &str) -> Option<String> {
        self.icons.get(name).cloned()
    }
}

/// Resolves icons to image files in a directory.
///
/// Extensions are tried in order, so `["png", "svg"]` prefers
/// `<dir>/<name>.png` over `<dir>/<name>.svg`. Names containing path
/// separators or `..` never resolve.
#[derive(Clone, Debug)]
pub struct DirectoryIcons {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectoryIcons {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["png".into(), "webp".into(), "svg".into()],
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

impl IconResolver for DirectoryIcons {
    fn icon_for(&self, name: &str) -> Option<String> {
        if name.contains(['/', '\\']) || name.contains("..") {
            return None;
        }
        self.extensions
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
            .map(|path| path.display().to_string())
    }
}

/// Resolve a record's declared icon.
pub fn resolve_icon(declared: Option<&str>, resolver: &dyn IconResolver) -> Icon {
    match declared {
        None | Some("") => Icon::None,
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Icon::Url(url.to_string())
        }
        Some(name) => match resolver.icon_for(name) {
            Some(handle) => Icon::Resource(handle),
            None => Icon::Placeholder,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_icon_is_none() {
        assert_eq!(resolve_icon(None, &NoIcons), Icon::None);
        assert_eq!(resolve_icon(Some(""), &NoIcons), Icon::None);
    }

    #[test]
    fn urls_pass_through() {
        assert_eq!(
            resolve_icon(Some("https://example.com/i.png"), &NoIcons),
            Icon::Url("https://example.com/i.png".into())
        );
        assert_eq!(
            resolve_icon(Some("http://example.com/i.png"), &NoIcons),
            Icon::Url("http://example.com/i.png".into())
        );
    }

    #[test]
    fn unknown_name_is_placeholder() {
        assert_eq!(resolve_icon(Some("ic_lib"), &NoIcons), Icon::Placeholder);
    }

    #[test]
    fn map_icons_resolve_known_names() {
        let mut icons = MapIcons::new();
        icons.insert("ic_lib", "drawable/ic_lib");
        assert_eq!(
            resolve_icon(Some("ic_lib"), &icons),
            Icon::Resource("drawable/ic_lib".into())
        );
        assert_eq!(resolve_icon(Some("ic_other"), &icons), Icon::Placeholder);
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |name: &str| Some(format!("mipmap/{name}"));
        assert_eq!(
            resolve_icon(Some("ic_lib"), &resolver),
            Icon::Resource("mipmap/ic_lib".into())
        );
    }

    #[test]
    fn directory_icons_try_extensions_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ic_lib.svg"), b"<svg/>").unwrap();
        std::fs::write(dir.path().join("ic_lib.png"), b"png").unwrap();
        std::fs::write(dir.path().join("ic_vec.svg"), b"<svg/>").unwrap();

        let icons = DirectoryIcons::new(dir.path());
        assert_eq!(
            icons.icon_for("ic_lib"),
            Some(dir.path().join("ic_lib.png").display().to_string())
        );
        assert_eq!(
            icons.icon_for("ic_vec"),
            Some(dir.path().join("ic_vec.svg").display().to_string())
        );
        assert_eq!(icons.icon_for("ic_missing"), None);

        let svg_only = DirectoryIcons::new(dir.path()).with_extensions(["svg"]);
        assert_eq!(
            svg_only.icon_for("ic_lib"),
            Some(dir.path().join("ic_lib.svg").display().to_string())
        );
    }

    #[test]
    fn directory_icons_reject_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let icons = DirectoryIcons::new(dir.path().join("icons"));
        assert_eq!(icons.icon_for("../secret"), None);
        assert_eq!(icons.icon_for("a/b"), None);
    }
}
