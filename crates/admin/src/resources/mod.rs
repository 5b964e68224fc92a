//! Admin resources and panel navigation.

pub mod product;

use serde::Serialize;

/// An entry in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub href: &'static str,
    pub sort: i32,
}

impl NavigationItem {
    /// Whether `current_path` belongs to this entry.
    #[must_use]
    pub fn is_active(&self, current_path: &str) -> bool {
        if self.href == "/" {
            return current_path == "/";
        }
        current_path == self.href
            || current_path
                .strip_prefix(self.href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

const DASHBOARD: NavigationItem = NavigationItem {
    label: "Dashboard",
    icon: "heroicon-o-home",
    href: "/",
    sort: -2,
};

/// Sidebar entries ordered by sort position.
#[must_use]
pub fn navigation() -> Vec<NavigationItem> {
    let mut items = vec![product::NAVIGATION, DASHBOARD];
    items.sort_by_key(|item| item.sort);
    items
}
