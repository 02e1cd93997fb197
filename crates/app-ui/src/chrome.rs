//! Chrome policy: app bar, bottom bar and floating action button state
//!
//! Everything here is a pure function of the current route and the registry,
//! except [`MultiFabState`] which is the expand/collapse state of the
//! multi-action button and [`ChromeTracker`] which caches the derived state
//! for observers.

use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::navigation::{DestinationChanged, NavigationObserver, Route};
use crate::registry::RouteRegistry;

/// App bar elevation for flat screens (dp)
pub const FLAT_ELEVATION: f32 = 0.0;

/// Default app bar elevation (dp)
pub const STANDARD_ELEVATION: f32 = 4.0;

/// Title shown on the one-rep-max and repeat-cycle setup steps
pub const PROGRAMS_SETUP_TITLE: &str = "Programs Setup";

/// Routes drawn with a flat app bar
const FLAT_ROUTES: &[Route] = &[
    Route::WorkoutPrograms,
    Route::ProgramOverview,
    Route::ExerciseSelection,
    Route::OneRepMax,
    Route::RepeatCycle,
];

/// Fixed app bar titles, checked before the route-derived default
const TITLE_OVERRIDES: &[(Route, &str)] = &[
    (Route::OneRepMax, PROGRAMS_SETUP_TITLE),
    (Route::RepeatCycle, PROGRAMS_SETUP_TITLE),
];

// =============================================================================
// Floating Action Button
// =============================================================================

/// Which floating action button to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FabVariant {
    /// No button
    #[default]
    None,
    /// Extended "create" button
    SingleAdd,
    /// Expandable button with sub-actions
    MultiAdd,
}

/// Expand/collapse state of the multi-action button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiFabState {
    /// Only the main button is visible
    #[default]
    Collapsed,
    /// Sub-actions are visible
    Expanded,
}

impl MultiFabState {
    /// State after a tap on the main button
    pub fn toggled(self) -> Self {
        match self {
            MultiFabState::Collapsed => MultiFabState::Expanded,
            MultiFabState::Expanded => MultiFabState::Collapsed,
        }
    }
}

/// Sub-action of the multi-action button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MultiFabItem {
    /// Stable identifier passed back on tap
    pub identifier: &'static str,
    /// Icon resource key
    pub icon: &'static str,
    /// Label resource key
    pub label: &'static str,
}

/// Sub-actions for the edit-day screen
pub const EDIT_DAY_FAB_ITEMS: &[MultiFabItem] = &[
    MultiFabItem {
        identifier: "addExercise",
        icon: "ic_add_white",
        label: "program_add_exercise_item",
    },
    MultiFabItem {
        identifier: "addRest",
        icon: "ic_add_white",
        label: "program_add_rest_item",
    },
];

/// Where a single-add button leads, if anywhere
pub fn single_add_target(route: Route) -> Option<Route> {
    match route {
        Route::WorkoutPrograms => Some(Route::CreateProgram),
        _ => None,
    }
}

/// Where a multi-action sub-item leads, if anywhere
pub fn multi_fab_target(identifier: &str) -> Option<Route> {
    match identifier {
        "addExercise" => Some(Route::ExerciseSelection),
        _ => None,
    }
}

// =============================================================================
// Chrome State
// =============================================================================

/// Derived UI chrome for one route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromeState {
    /// Back arrow instead of the drawer icon
    pub show_back_arrow: bool,
    /// App bar title
    pub app_bar_title: &'static str,
    /// App bar elevation (dp)
    pub app_bar_elevation: f32,
    /// Floating action button
    pub fab_variant: FabVariant,
    /// Bottom bar shown at all
    pub bottom_bar_visible: bool,
    /// Highlighted drawer destination
    pub selected_drawer_item: Option<Route>,
    /// Highlighted bottom bar destination
    pub selected_bottom_item: Option<Route>,
}

/// Back arrow for detail routes, drawer icon for everything else
pub fn show_back_arrow(route: Route) -> bool {
    route.is_detail()
}

/// App bar elevation for a route
pub fn app_bar_elevation(route: Route) -> f32 {
    if FLAT_ROUTES.contains(&route) {
        FLAT_ELEVATION
    } else {
        STANDARD_ELEVATION
    }
}

/// App bar title for a route
pub fn app_bar_title(route: Route) -> &'static str {
    TITLE_OVERRIDES
        .iter()
        .find(|(candidate, _)| *candidate == route)
        .map(|(_, title)| *title)
        .unwrap_or_else(|| route.key())
}

/// Floating action button for a route
pub fn fab_variant(route: Route) -> FabVariant {
    match route {
        Route::Home | Route::WorkoutPrograms => FabVariant::SingleAdd,
        Route::EditDay => FabVariant::MultiAdd,
        _ => FabVariant::None,
    }
}

/// Bottom bar only on bottom-nav destinations
pub fn bottom_bar_visible(route: Route, registry: &RouteRegistry) -> bool {
    registry.is_bottom_nav_route(route)
}

/// Derive the full chrome for a route
pub fn derive_chrome_state(route: Route, registry: &RouteRegistry) -> ChromeState {
    ChromeState {
        show_back_arrow: show_back_arrow(route),
        app_bar_title: app_bar_title(route),
        app_bar_elevation: app_bar_elevation(route),
        fab_variant: fab_variant(route),
        bottom_bar_visible: bottom_bar_visible(route, registry),
        selected_drawer_item: route.hierarchy().find(|r| registry.is_drawer_route(*r)),
        selected_bottom_item: route.hierarchy().find(|r| registry.is_bottom_nav_route(*r)),
    }
}

// =============================================================================
// Chrome Tracker
// =============================================================================

/// Keeps the derived chrome in sync with the navigation controller
#[derive(Debug)]
pub struct ChromeTracker {
    registry: Rc<RouteRegistry>,
    state: RefCell<ChromeState>,
    revision: Cell<u64>,
}

impl ChromeTracker {
    /// Create a tracker showing the chrome for `route`
    pub fn new(registry: Rc<RouteRegistry>, route: Route) -> Self {
        let state = derive_chrome_state(route, &registry);
        Self {
            registry,
            state: RefCell::new(state),
            revision: Cell::new(0),
        }
    }

    /// Latest derived chrome
    pub fn state(&self) -> ChromeState {
        self.state.borrow().clone()
    }

    /// Number of recomputations so far
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }
}

impl NavigationObserver for ChromeTracker {
    fn on_destination_changed(&self, event: &DestinationChanged) {
        *self.state.borrow_mut() = derive_chrome_state(event.current, &self.registry);
        self.revision.set(self.revision.get() + 1);
    }
}
