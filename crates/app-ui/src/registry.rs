//! Static catalog of routes, drawer entries and bottom navigation entries
//!
//! The registry is built once at startup and validated at construction time.
//! Labels, icons and content descriptions are resource keys; resolving them
//! to display text is the host's job.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::navigation::Route;

/// Registry construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Header or separator carries a route
    #[error("Drawer item at index {index} is decorative but targets route `{route}`")]
    DecorativeItemWithRoute {
        /// Index in the drawer list
        index: usize,
        /// The offending route
        route: Route,
    },

    /// Item flagged as both header and separator
    #[error("Drawer item at index {0} is both a header and a separator")]
    HeaderAndSeparator(usize),

    /// Navigable drawer item without a route
    #[error("Drawer item at index {0} has no target route")]
    MissingRoute(usize),

    /// Navigable drawer item or header without a label
    #[error("Drawer item at index {0} has no label")]
    MissingLabel(usize),

    /// An item references a route that is not registered
    #[error("Route `{0}` is referenced but not registered")]
    UnregisteredRoute(Route),

    /// Same route listed twice in one menu
    #[error("Route `{0}` appears more than once in the same menu")]
    DuplicateMenuRoute(Route),

    /// Start route is not registered
    #[error("Start route `{0}` is not registered")]
    UnregisteredStart(Route),

    /// Start route is a detail page, whose back arrow could never pop
    #[error("Start route `{0}` is a detail route")]
    DetailStart(Route),
}

/// Result type for registry construction
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Drawer entry
///
/// Headers and separators are decorative and carry no route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawerItem {
    /// Label resource key
    pub label: Option<&'static str>,
    /// Icon resource key
    pub icon: Option<&'static str>,
    /// Target route
    pub route: Option<Route>,
    /// Section header row
    pub is_header: bool,
    /// Divider row
    pub is_separator: bool,
}

impl DrawerItem {
    /// Create a section header
    pub fn header(label: &'static str) -> Self {
        Self {
            label: Some(label),
            icon: None,
            route: None,
            is_header: true,
            is_separator: false,
        }
    }

    /// Create a divider
    pub fn separator() -> Self {
        Self {
            label: None,
            icon: None,
            route: None,
            is_header: false,
            is_separator: true,
        }
    }

    /// Create a navigable entry
    pub fn entry(label: &'static str, icon: &'static str, route: Route) -> Self {
        Self {
            label: Some(label),
            icon: Some(icon),
            route: Some(route),
            is_header: false,
            is_separator: false,
        }
    }

    /// Check if tapping this item navigates
    pub fn is_navigable(&self) -> bool {
        !self.is_header && !self.is_separator
    }
}

/// Bottom navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BottomNavItem {
    /// Target route
    pub route: Route,
    /// Icon resource key
    pub icon: &'static str,
    /// Accessibility description resource key
    pub content_description: &'static str,
}

impl BottomNavItem {
    /// Create a bottom navigation entry
    pub fn new(route: Route, icon: &'static str, content_description: &'static str) -> Self {
        Self {
            route,
            icon,
            content_description,
        }
    }
}

/// Validated route catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistry {
    routes: BTreeSet<Route>,
    drawer_items: Vec<DrawerItem>,
    bottom_nav_items: Vec<BottomNavItem>,
    start_route: Route,
}

impl RouteRegistry {
    /// Start building a registry
    pub fn builder() -> RouteRegistryBuilder {
        RouteRegistryBuilder::default()
    }

    /// The application's registry: every route, the standard drawer and bottom bar
    ///
    /// # Panics
    ///
    /// Panics if the built-in tables are inconsistent.
    pub fn standard() -> Self {
        Self::builder()
            .routes(Route::ALL)
            .drawer_items(vec![
                DrawerItem::header("drawer_general"),
                DrawerItem::entry("drawer_home", "ic_home", Route::Home),
                DrawerItem::entry("drawer_programs", "ic_programs", Route::WorkoutPrograms),
                DrawerItem::entry("drawer_google_sync", "ic_sync", Route::GoogleSync),
                DrawerItem::separator(),
                DrawerItem::entry("drawer_settings", "ic_settings", Route::Settings),
                DrawerItem::entry("drawer_purchases", "ic_purchases", Route::Purchases),
                DrawerItem::entry("drawer_rate_app", "ic_rate", Route::RateThisApp),
                DrawerItem::entry("drawer_faq", "ic_faq", Route::Faq),
            ])
            .bottom_nav_items(vec![
                BottomNavItem::new(Route::Home, "ic_star", "bottom_nav_workout"),
                BottomNavItem::new(Route::Progress, "ic_star", "bottom_nav_progress"),
                BottomNavItem::new(Route::History, "ic_star", "bottom_nav_history"),
            ])
            .build()
            .expect("standard route tables are consistent")
    }

    /// All registered routes
    pub fn all_routes(&self) -> &BTreeSet<Route> {
        &self.routes
    }

    /// Check if a route is registered
    pub fn contains(&self, route: Route) -> bool {
        self.routes.contains(&route)
    }

    /// Drawer entries in display order
    pub fn drawer_items(&self) -> &[DrawerItem] {
        &self.drawer_items
    }

    /// Bottom navigation entries in display order
    pub fn bottom_nav_items(&self) -> &[BottomNavItem] {
        &self.bottom_nav_items
    }

    /// The bottom of every back stack
    pub fn start_route(&self) -> Route {
        self.start_route
    }

    /// Check if a route is one of the bottom-nav destinations
    pub fn is_bottom_nav_route(&self, route: Route) -> bool {
        self.bottom_nav_items.iter().any(|item| item.route == route)
    }

    /// Check if a route is a navigable drawer destination
    pub fn is_drawer_route(&self, route: Route) -> bool {
        self.drawer_items.iter().any(|item| item.route == Some(route))
    }
}

/// Builder for [`RouteRegistry`]
#[derive(Debug, Clone)]
pub struct RouteRegistryBuilder {
    routes: BTreeSet<Route>,
    drawer_items: Vec<DrawerItem>,
    bottom_nav_items: Vec<BottomNavItem>,
    start_route: Route,
}

impl Default for RouteRegistryBuilder {
    fn default() -> Self {
        Self {
            routes: BTreeSet::new(),
            drawer_items: Vec::new(),
            bottom_nav_items: Vec::new(),
            start_route: Route::Home,
        }
    }
}

impl RouteRegistryBuilder {
    /// Register one route
    pub fn route(mut self, route: Route) -> Self {
        self.routes.insert(route);
        self
    }

    /// Register several routes
    pub fn routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Set the drawer entries
    pub fn drawer_items(mut self, items: Vec<DrawerItem>) -> Self {
        self.drawer_items = items;
        self
    }

    /// Set the bottom navigation entries
    pub fn bottom_nav_items(mut self, items: Vec<BottomNavItem>) -> Self {
        self.bottom_nav_items = items;
        self
    }

    /// Set the start route
    pub fn start_route(mut self, route: Route) -> Self {
        self.start_route = route;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<RouteRegistry> {
        if !self.routes.contains(&self.start_route) {
            return Err(RegistryError::UnregisteredStart(self.start_route));
        }
        if self.start_route.is_detail() {
            return Err(RegistryError::DetailStart(self.start_route));
        }

        let mut seen = BTreeSet::new();
        for (index, item) in self.drawer_items.iter().enumerate() {
            if item.is_header && item.is_separator {
                return Err(RegistryError::HeaderAndSeparator(index));
            }
            match (item.is_navigable(), item.route) {
                (false, Some(route)) => {
                    return Err(RegistryError::DecorativeItemWithRoute { index, route });
                }
                (true, None) => return Err(RegistryError::MissingRoute(index)),
                (true, Some(route)) => {
                    if !self.routes.contains(&route) {
                        return Err(RegistryError::UnregisteredRoute(route));
                    }
                    if !seen.insert(route) {
                        return Err(RegistryError::DuplicateMenuRoute(route));
                    }
                }
                (false, None) => {}
            }
            if !item.is_separator && item.label.is_none() {
                return Err(RegistryError::MissingLabel(index));
            }
        }

        let mut seen = BTreeSet::new();
        for item in &self.bottom_nav_items {
            if !self.routes.contains(&item.route) {
                return Err(RegistryError::UnregisteredRoute(item.route));
            }
            if !seen.insert(item.route) {
                return Err(RegistryError::DuplicateMenuRoute(item.route));
            }
        }

        Ok(RouteRegistry {
            routes: self.routes,
            drawer_items: self.drawer_items,
            bottom_nav_items: self.bottom_nav_items,
            start_route: self.start_route,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = RouteRegistry::standard();
        assert_eq!(registry.all_routes().len(), Route::ALL.len());
        assert_eq!(registry.start_route(), Route::Home);
        assert_eq!(registry.bottom_nav_items().len(), 3);
        assert!(registry.is_bottom_nav_route(Route::History));
        assert!(!registry.is_bottom_nav_route(Route::Settings));
        assert!(registry.is_drawer_route(Route::Faq));
        assert!(!registry.is_drawer_route(Route::EditDay));
    }

    #[test]
    fn test_drawer_decorative_rows() {
        let registry = RouteRegistry::standard();
        let items = registry.drawer_items();
        assert!(items[0].is_header);
        assert!(items.iter().any(|item| item.is_separator));
        assert!(items
            .iter()
            .filter(|item| !item.is_navigable())
            .all(|item| item.route.is_none()));
    }

    #[test]
    fn test_header_with_route_rejected() {
        let mut header = DrawerItem::header("drawer_general");
        header.route = Some(Route::Home);
        let err = RouteRegistry::builder()
            .routes(Route::ALL)
            .drawer_items(vec![header])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DecorativeItemWithRoute {
                index: 0,
                route: Route::Home
            }
        );
    }

    #[test]
    fn test_header_and_separator_rejected() {
        let mut item = DrawerItem::separator();
        item.is_header = true;
        let err = RouteRegistry::builder()
            .routes(Route::ALL)
            .drawer_items(vec![item])
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::HeaderAndSeparator(0));
    }

    #[test]
    fn test_entry_without_route_rejected() {
        let mut item = DrawerItem::entry("drawer_faq", "ic_faq", Route::Faq);
        item.route = None;
        let err = RouteRegistry::builder()
            .routes(Route::ALL)
            .drawer_items(vec![DrawerItem::separator(), item])
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::MissingRoute(1));
    }

    #[test]
    fn test_unregistered_menu_route_rejected() {
        let err = RouteRegistry::builder()
            .route(Route::Home)
            .bottom_nav_items(vec![BottomNavItem::new(
                Route::Progress,
                "ic_star",
                "bottom_nav_progress",
            )])
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::UnregisteredRoute(Route::Progress));
    }

    #[test]
    fn test_duplicate_bottom_route_rejected() {
        let item = BottomNavItem::new(Route::Home, "ic_star", "bottom_nav_workout");
        let err = RouteRegistry::builder()
            .route(Route::Home)
            .bottom_nav_items(vec![item.clone(), item])
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateMenuRoute(Route::Home));
    }

    #[test]
    fn test_unregistered_start_rejected() {
        let err = RouteRegistry::builder()
            .route(Route::Home)
            .start_route(Route::WelcomeCarousel)
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::UnregisteredStart(Route::WelcomeCarousel));
    }

    #[test]
    fn test_detail_start_rejected() {
        let err = RouteRegistry::builder()
            .routes(Route::ALL)
            .start_route(Route::OneRepMax)
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DetailStart(Route::OneRepMax));

        let registry = RouteRegistry::builder()
            .routes(Route::ALL)
            .start_route(Route::WelcomeCarousel)
            .build()
            .unwrap();
        assert_eq!(registry.start_route(), Route::WelcomeCarousel);
    }

    #[test]
    fn test_unlabelled_entry_rejected() {
        let mut item = DrawerItem::entry("drawer_faq", "ic_faq", Route::Faq);
        item.label = None;
        let err = RouteRegistry::builder()
            .routes(Route::ALL)
            .drawer_items(vec![DrawerItem::header("drawer_general"), item])
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::MissingLabel(1));
    }
}
