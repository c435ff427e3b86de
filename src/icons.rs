//! Icon resolution and GPU texture caching
//!
//! Profile and browser icons come either from an absolute path in the
//! catalog or from the freedesktop icon theme by name. Decoded images
//! are uploaded once per session and cached by name; anything that
//! fails to resolve falls back to the letter placeholder the renderer
//! draws itself.

use std::collections::HashMap;
use std::path::PathBuf;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use tracing::debug;

/// Resolve an icon name to a raster file on disk.
///
/// Accepts an absolute path directly; otherwise walks the freedesktop
/// lookup, a handful of well-stocked theme directories, and finally a
/// lowercase alternate. SVG results are skipped since the renderer
/// only decodes raster formats.
pub fn find_icon_path(icon_name: &str, size: u16) -> Option<PathBuf> {
    if icon_name.starts_with('/') {
        let path = PathBuf::from(icon_name);
        if path.exists() {
            return Some(path);
        }
    }

    if let Some(path) = freedesktop_icons::lookup(icon_name)
        .with_size(size)
        .with_scale(1)
        .find()
    {
        if !is_svg(&path) {
            return Some(path);
        }
    }

    // Direct probes into themes that ship large PNG app icons.
    let icon_themes = ["Pop", "Adwaita", "hicolor", "Papirus"];
    let categories = ["apps", "actions", "places", "status"];
    let size_dir = format!("{size}x{size}");
    for theme in icon_themes {
        for category in categories {
            let path = PathBuf::from(format!(
                "/usr/share/icons/{theme}/{size_dir}/{category}/{icon_name}.png"
            ));
            if path.exists() {
                return Some(path);
            }
        }
    }

    // Browsers often install under a lowercase or -desktop variant.
    let alternates = [format!("{icon_name}-desktop"), icon_name.to_lowercase()];
    for alt in alternates {
        if alt != icon_name {
            if let Some(path) = freedesktop_icons::lookup(&alt)
                .with_size(size)
                .with_scale(1)
                .find()
            {
                if !is_svg(&path) {
                    return Some(path);
                }
            }
        }
    }

    None
}

fn is_svg(path: &std::path::Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Per-session texture cache keyed by icon name.
///
/// Failed lookups are cached too, so a missing icon costs one disk
/// probe rather than one per frame.
#[derive(Default)]
pub struct IconCache {
    textures: HashMap<String, Option<TextureHandle>>,
}

impl IconCache {
    /// Fetch the texture for an icon name, loading it on first use.
    pub fn get(&mut self, ctx: &Context, name: &str, size: u16) -> Option<TextureHandle> {
        if let Some(cached) = self.textures.get(name) {
            return cached.clone();
        }
        let loaded = load_texture(ctx, name, size);
        if loaded.is_none() {
            debug!(icon = name, "no usable icon found");
        }
        self.textures.insert(name.to_string(), loaded.clone());
        loaded
    }
}

fn load_texture(ctx: &Context, name: &str, size: u16) -> Option<TextureHandle> {
    let path = find_icon_path(name, size)?;
    let image = image::open(&path).ok()?.into_rgba8();
    let (w, h) = image.dimensions();
    let color_image =
        ColorImage::from_rgba_unmultiplied([w as usize, h as usize], image.as_raw());
    Some(ctx.load_texture(format!("icon:{name}"), color_image, TextureOptions::LINEAR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_must_exist() {
        assert_eq!(find_icon_path("/nonexistent/icon.png", 64), None);
    }

    #[test]
    fn svg_paths_are_rejected() {
        assert!(is_svg(std::path::Path::new("/usr/share/icons/a.svg")));
        assert!(is_svg(std::path::Path::new("/usr/share/icons/a.SVG")));
        assert!(!is_svg(std::path::Path::new("/usr/share/icons/a.png")));
    }
}
