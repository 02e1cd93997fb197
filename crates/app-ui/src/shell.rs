//! Application shell: drawer, bottom bar, top bar and floating action button
//!
//! The shell turns the current destination into a [`ShellFrame`] and routes
//! user input (taps, system back) into the [`NavController`]. Screen content
//! comes from factories registered per route; the shell never looks inside it.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::chrome::{
    multi_fab_target, single_add_target, ChromeState, ChromeTracker, FabVariant, MultiFabItem,
    MultiFabState, EDIT_DAY_FAB_ITEMS,
};
use crate::navigation::{Destination, NavController, NavOptions, Route, TransientState};
use crate::registry::{RegistryError, RouteRegistry};

/// Shell construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    /// Registry failed validation
    #[error("Invalid route registry: {0}")]
    Registry(#[from] RegistryError),

    /// A registered route has no screen factory
    #[error("No screen registered for route `{0}`")]
    MissingScreen(Route),
}

/// Result type for shell construction
pub type Result<T> = std::result::Result<T, ShellError>;

// =============================================================================
// Screen Factories
// =============================================================================

/// Renders the content for a destination
pub type ScreenFactory<C> = Box<dyn Fn(&Destination) -> C>;

/// Screen factories keyed by route
pub struct ScreenRegistry<C> {
    factories: HashMap<Route, ScreenFactory<C>>,
}

impl<C> Default for ScreenRegistry<C> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<C> fmt::Debug for ScreenRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<_> = self.factories.keys().collect();
        routes.sort();
        f.debug_struct("ScreenRegistry").field("routes", &routes).finish()
    }
}

impl<C> ScreenRegistry<C> {
    /// Create an empty screen registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory for a route, replacing any previous one
    pub fn register(mut self, route: Route, factory: impl Fn(&Destination) -> C + 'static) -> Self {
        self.factories.insert(route, Box::new(factory));
        self
    }

    /// Check if a route has a factory
    pub fn contains(&self, route: Route) -> bool {
        self.factories.contains_key(&route)
    }

    /// Fail on the first registered route without a factory
    pub fn validate(&self, registry: &RouteRegistry) -> Result<()> {
        match registry.all_routes().iter().find(|route| !self.contains(**route)) {
            Some(route) => Err(ShellError::MissingScreen(*route)),
            None => Ok(()),
        }
    }

    fn render(&self, destination: &Destination) -> Option<C> {
        self.factories
            .get(&destination.route)
            .map(|factory| factory(destination))
    }
}

// =============================================================================
// Frame Model
// =============================================================================

/// Icon on the leading edge of the top bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavIcon {
    /// Pops the back stack
    BackArrow,
    /// Opens the drawer
    Drawer,
}

/// Top app bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopBar {
    /// Leading icon
    pub nav_icon: NavIcon,
    /// Title text or resource key
    pub title: &'static str,
    /// Elevation (dp)
    pub elevation: f32,
}

/// One drawer row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawerRow {
    /// Section header
    Header {
        /// Label resource key
        label: &'static str,
    },
    /// Divider
    Separator,
    /// Navigable entry
    Entry {
        /// Label resource key
        label: &'static str,
        /// Icon resource key
        icon: Option<&'static str>,
        /// Target route
        route: Route,
        /// Highlighted
        selected: bool,
    },
}

/// One bottom bar item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottomBarItem {
    /// Target route
    pub route: Route,
    /// Icon resource key
    pub icon: &'static str,
    /// Accessibility description resource key
    pub content_description: &'static str,
    /// Highlighted
    pub selected: bool,
}

/// Floating action button as rendered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FabView {
    /// Nothing
    None,
    /// Extended "create" button
    SingleAdd {
        /// Label resource key
        label: &'static str,
    },
    /// Expandable button
    MultiAdd {
        /// Expanded or collapsed
        state: MultiFabState,
        /// Sub-actions, empty while collapsed
        items: Vec<MultiFabItem>,
    },
}

/// Everything on screen for one destination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellFrame<C> {
    /// Current route
    pub route: Route,
    /// Top app bar
    pub top_bar: TopBar,
    /// Drawer is open
    pub drawer_open: bool,
    /// Drawer rows
    pub drawer: Vec<DrawerRow>,
    /// Bottom bar, if visible
    pub bottom_bar: Option<Vec<BottomBarItem>>,
    /// Floating action button
    pub fab: FabView,
    /// Screen content
    pub content: C,
}

/// Result of a system back press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The shell consumed the press
    Handled,
    /// Already at the start destination; the host decides what exit means
    Exit,
}

// =============================================================================
// Shell Composer
// =============================================================================

/// Owns navigation plus transient shell UI state
pub struct ShellComposer<C> {
    nav: NavController,
    registry: Rc<RouteRegistry>,
    screens: ScreenRegistry<C>,
    chrome: Rc<ChromeTracker>,
    drawer_open: bool,
    multi_fab: MultiFabState,
}

impl<C> fmt::Debug for ShellComposer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellComposer")
            .field("nav", &self.nav)
            .field("screens", &self.screens)
            .field("drawer_open", &self.drawer_open)
            .field("multi_fab", &self.multi_fab)
            .finish()
    }
}

impl<C> ShellComposer<C> {
    /// Create a shell, checking that every route has a screen
    pub fn new(registry: RouteRegistry, screens: ScreenRegistry<C>) -> Result<Self> {
        screens.validate(&registry)?;

        let registry = Rc::new(registry);
        let mut nav = NavController::new(Rc::clone(&registry));
        let chrome = Rc::new(ChromeTracker::new(Rc::clone(&registry), nav.current_route()));
        nav.subscribe(chrome.clone());

        Ok(Self {
            nav,
            registry,
            screens,
            chrome,
            drawer_open: false,
            multi_fab: MultiFabState::Collapsed,
        })
    }

    /// Get the navigation controller
    pub fn nav(&self) -> &NavController {
        &self.nav
    }

    /// Get the route registry
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Current route
    pub fn current_route(&self) -> Route {
        self.nav.current_route()
    }

    /// Latest derived chrome
    pub fn chrome(&self) -> ChromeState {
        self.chrome.state()
    }

    /// Multi-action button state
    pub fn multi_fab_state(&self) -> MultiFabState {
        self.multi_fab
    }

    /// Check if the drawer is open
    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Open the drawer
    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    /// Close the drawer
    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    /// Record transient state (scroll, form input) on the current destination
    pub fn update_state(&mut self, update: impl FnOnce(&mut TransientState)) {
        self.nav.update_state(update);
    }

    /// Screen-initiated navigation
    pub fn navigate(&mut self, route: Route) {
        self.go(route, NavOptions::default());
    }

    /// Leading top bar icon: back arrow pops, drawer icon opens the drawer
    pub fn tap_nav_icon(&mut self) {
        if self.chrome().show_back_arrow {
            if self.nav.pop().is_ok() {
                self.multi_fab = MultiFabState::Collapsed;
            }
        } else {
            self.open_drawer();
        }
    }

    /// Tap on a drawer row; returns the route navigated to
    ///
    /// Headers, separators and out-of-range indices are ignored.
    pub fn tap_drawer_item(&mut self, index: usize) -> Option<Route> {
        let item = self.registry.drawer_items().get(index)?;
        let route = item.route.filter(|_| item.is_navigable())?;
        tracing::debug!(%route, index, "drawer item tapped");
        self.close_drawer();
        self.go(route, NavOptions::top_level());
        Some(route)
    }

    /// Tap on a bottom bar item; returns the route navigated to
    pub fn tap_bottom_item(&mut self, index: usize) -> Option<Route> {
        if !self.chrome().bottom_bar_visible {
            return None;
        }
        let route = self.registry.bottom_nav_items().get(index)?.route;
        tracing::debug!(%route, index, "bottom item tapped");
        self.go(route, NavOptions::top_level());
        Some(route)
    }

    /// Tap on the floating action button
    pub fn tap_fab(&mut self) {
        let route = self.current_route();
        match self.chrome().fab_variant {
            FabVariant::None => {}
            FabVariant::SingleAdd => match single_add_target(route) {
                Some(target) => self.go(target, NavOptions::default()),
                None => tracing::debug!(%route, "create button has no target"),
            },
            FabVariant::MultiAdd => {
                self.multi_fab = self.multi_fab.toggled();
                tracing::debug!(state = ?self.multi_fab, "multi-action button toggled");
            }
        }
    }

    /// Tap on a multi-action sub-item
    ///
    /// Ignored unless the button is showing and expanded. Always collapses.
    pub fn tap_multi_fab_item(&mut self, identifier: &str) {
        if self.chrome().fab_variant != FabVariant::MultiAdd
            || self.multi_fab != MultiFabState::Expanded
        {
            return;
        }
        self.multi_fab = MultiFabState::Collapsed;
        match multi_fab_target(identifier) {
            Some(target) => self.go(target, NavOptions::default()),
            None => tracing::debug!(identifier, "multi-action item has no target"),
        }
    }

    /// System back press
    pub fn system_back(&mut self) -> BackOutcome {
        if self.drawer_open {
            self.close_drawer();
            return BackOutcome::Handled;
        }
        if self.multi_fab == MultiFabState::Expanded {
            self.multi_fab = MultiFabState::Collapsed;
            return BackOutcome::Handled;
        }
        match self.nav.pop() {
            Ok(_) => BackOutcome::Handled,
            Err(_) => BackOutcome::Exit,
        }
    }

    /// Build the frame for the current destination
    pub fn render(&self) -> ShellFrame<C> {
        let chrome = self.chrome();
        let destination = self.nav.current();

        let drawer = self
            .registry
            .drawer_items()
            .iter()
            .filter_map(|item| {
                if item.is_header {
                    Some(DrawerRow::Header {
                        label: item.label.unwrap_or_default(),
                    })
                } else if item.is_separator {
                    Some(DrawerRow::Separator)
                } else {
                    let route = item.route?;
                    Some(DrawerRow::Entry {
                        label: item.label.unwrap_or_default(),
                        icon: item.icon,
                        route,
                        selected: chrome.selected_drawer_item == Some(route),
                    })
                }
            })
            .collect();

        let bottom_bar = chrome.bottom_bar_visible.then(|| {
            self.registry
                .bottom_nav_items()
                .iter()
                .map(|item| BottomBarItem {
                    route: item.route,
                    icon: item.icon,
                    content_description: item.content_description,
                    selected: chrome.selected_bottom_item == Some(item.route),
                })
                .collect()
        });

        let fab = match chrome.fab_variant {
            FabVariant::None => FabView::None,
            FabVariant::SingleAdd => FabView::SingleAdd {
                label: "programs_create_btn",
            },
            FabVariant::MultiAdd => FabView::MultiAdd {
                state: self.multi_fab,
                items: match self.multi_fab {
                    MultiFabState::Expanded => EDIT_DAY_FAB_ITEMS.to_vec(),
                    MultiFabState::Collapsed => Vec::new(),
                },
            },
        };

        let content = self
            .screens
            .render(destination)
            .expect("every registered route has a screen");

        ShellFrame {
            route: destination.route,
            top_bar: TopBar {
                nav_icon: if chrome.show_back_arrow {
                    NavIcon::BackArrow
                } else {
                    NavIcon::Drawer
                },
                title: chrome.app_bar_title,
                elevation: chrome.app_bar_elevation,
            },
            drawer_open: self.drawer_open,
            drawer,
            bottom_bar,
            fab,
            content,
        }
    }

    fn go(&mut self, route: Route, options: NavOptions) {
        self.nav.navigate(route, options);
        self.multi_fab = MultiFabState::Collapsed;
    }
}
