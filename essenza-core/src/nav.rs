//! Navigation bar items and active-link matching.

use serde::Serialize;

pub mod paths {
    pub const HOME: &str = "/";
    pub const RECIPES: &str = "/recipes";
    pub const ADD_RECIPE: &str = "/recipes/add";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
}

/// Navigation entries in display order.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        path: paths::HOME,
        label: "Home",
    },
    NavItem {
        path: paths::RECIPES,
        label: "Recipes",
    },
    NavItem {
        path: paths::ADD_RECIPE,
        label: "Add recipe",
    },
];

/// A nav item resolved against the current path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub path: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Whether the item at `path` should be highlighted for `current_path`.
///
/// Home matches only itself. The listing matches only `/recipes` and
/// `/recipes/`, never its detail or creation sub-pages. Everything else is a
/// prefix match.
pub fn is_active(path: &str, current_path: &str) -> bool {
    match path {
        paths::HOME => current_path == paths::HOME,
        paths::RECIPES => current_path == "/recipes" || current_path == "/recipes/",
        _ => current_path.starts_with(path),
    }
}

pub fn nav_links(current_path: &str) -> Vec<NavLink> {
    NAV_ITEMS
        .iter()
        .map(|item| NavLink {
            path: item.path,
            label: item.label,
            active: is_active(item.path, current_path),
        })
        .collect()
}
