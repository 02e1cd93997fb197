//! Navigation system for the workout tracker
//!
//! This module provides a type-safe navigation framework with:
//! - A closed set of route definitions grouped by feature area
//! - Back stack management with single-top, pop-to-start and saved state
//! - Synchronous destination-changed notifications for observers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::registry::RouteRegistry;

// =============================================================================
// Errors
// =============================================================================

/// Navigation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Tried to pop the start destination
    #[error("Cannot pop the start destination")]
    EmptyStack,

    /// Route key did not match any known route
    #[error("Unknown route key: {0}")]
    UnknownRouteKey(String),
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;

// =============================================================================
// Route Definitions
// =============================================================================

/// Feature area a route belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteGroup {
    /// Workout home
    Home,
    /// Progress charts
    Progress,
    /// Workout history
    History,
    /// Program setup sub-routes
    ProgramSetup,
    /// Settings sub-routes
    SettingsPages,
    /// Google sync sub-routes
    GoogleSyncPages,
    /// Routes reachable only from the drawer
    DrawerOnly,
    /// Onboarding flow
    Onboarding,
}

/// All possible routes in the application
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub enum Route {
    // Main tabs
    /// Workout home, the start destination
    #[default]
    Home,
    /// Progress overview
    Progress,
    /// Workout history
    History,

    // Drawer destinations
    /// Workout program list
    WorkoutPrograms,
    /// Google sync sign-in
    GoogleSync,
    /// General settings
    Settings,
    /// In-app purchases
    Purchases,
    /// Rate this app
    RateThisApp,
    /// Frequently asked questions
    Faq,

    // Program setup
    /// One-rep-max entry step
    OneRepMax,
    /// Repeat cycle step
    RepeatCycle,
    /// Program overview
    ProgramOverview,
    /// Create a new program
    CreateProgram,
    /// Edit a program day
    EditDay,
    /// Pick exercises for a day
    ExerciseSelection,

    // Settings
    /// About the app
    AboutSettings,
    /// Privacy policy
    PrivacyPolicy,
    /// Theme selection
    AppThemeSettings,
    /// Notification settings
    NotificationSettings,
    /// Data management (export, reset)
    DataManagement,
    /// Report a bug
    ReportBug,

    // Google sync
    /// Google sync settings, shown after sign-in
    GoogleSyncSettings,

    // Onboarding
    /// Intro carousel
    WelcomeCarousel,
}

impl Route {
    /// Every route, in declaration order
    pub const ALL: [Route; 23] = [
        Route::Home,
        Route::Progress,
        Route::History,
        Route::WorkoutPrograms,
        Route::GoogleSync,
        Route::Settings,
        Route::Purchases,
        Route::RateThisApp,
        Route::Faq,
        Route::OneRepMax,
        Route::RepeatCycle,
        Route::ProgramOverview,
        Route::CreateProgram,
        Route::EditDay,
        Route::ExerciseSelection,
        Route::AboutSettings,
        Route::PrivacyPolicy,
        Route::AppThemeSettings,
        Route::NotificationSettings,
        Route::DataManagement,
        Route::ReportBug,
        Route::GoogleSyncSettings,
        Route::WelcomeCarousel,
    ];

    /// Get the unique string key for this route
    pub fn key(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Progress => "progress",
            Route::History => "history",
            Route::WorkoutPrograms => "programs",
            Route::GoogleSync => "google_sync",
            Route::Settings => "settings",
            Route::Purchases => "purchases",
            Route::RateThisApp => "rate_this_app",
            Route::Faq => "faq",
            Route::OneRepMax => "programs/one_rep_max",
            Route::RepeatCycle => "programs/repeat_cycle",
            Route::ProgramOverview => "programs/overview",
            Route::CreateProgram => "programs/create",
            Route::EditDay => "programs/edit_day",
            Route::ExerciseSelection => "programs/exercise_selection",
            Route::AboutSettings => "settings/about",
            Route::PrivacyPolicy => "settings/privacy_policy",
            Route::AppThemeSettings => "settings/app_theme",
            Route::NotificationSettings => "settings/notifications",
            Route::DataManagement => "settings/data_management",
            Route::ReportBug => "settings/report_bug",
            Route::GoogleSyncSettings => "google_sync/settings",
            Route::WelcomeCarousel => "intro/welcome_carousel",
        }
    }

    /// Look up a route by its key
    pub fn from_key(key: &str) -> Option<Route> {
        Route::ALL.iter().copied().find(|route| route.key() == key)
    }

    /// Get the feature area this route belongs to
    pub fn group(&self) -> RouteGroup {
        match self {
            Route::Home => RouteGroup::Home,
            Route::Progress => RouteGroup::Progress,
            Route::History => RouteGroup::History,
            Route::WorkoutPrograms
            | Route::GoogleSync
            | Route::Settings
            | Route::Purchases
            | Route::RateThisApp
            | Route::Faq => RouteGroup::DrawerOnly,
            Route::OneRepMax
            | Route::RepeatCycle
            | Route::ProgramOverview
            | Route::CreateProgram
            | Route::EditDay
            | Route::ExerciseSelection => RouteGroup::ProgramSetup,
            Route::AboutSettings
            | Route::PrivacyPolicy
            | Route::AppThemeSettings
            | Route::NotificationSettings
            | Route::DataManagement
            | Route::ReportBug => RouteGroup::SettingsPages,
            Route::GoogleSyncSettings => RouteGroup::GoogleSyncPages,
            Route::WelcomeCarousel => RouteGroup::Onboarding,
        }
    }

    /// Get the top-level route this route is nested under, if any
    pub fn parent(&self) -> Option<Route> {
        match self.group() {
            RouteGroup::ProgramSetup => Some(Route::WorkoutPrograms),
            RouteGroup::SettingsPages => Some(Route::Settings),
            RouteGroup::GoogleSyncPages => Some(Route::GoogleSync),
            _ => None,
        }
    }

    /// Check if this is a detail route (shows a back arrow instead of the drawer icon)
    pub fn is_detail(&self) -> bool {
        matches!(
            self.group(),
            RouteGroup::ProgramSetup | RouteGroup::SettingsPages | RouteGroup::GoogleSyncPages
        )
    }

    /// Iterate this route followed by its ancestors
    pub fn hierarchy(&self) -> impl Iterator<Item = Route> {
        std::iter::successors(Some(*self), |route| route.parent())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Route {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self> {
        Route::from_key(s).ok_or_else(|| NavigationError::UnknownRouteKey(s.to_string()))
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.key().to_string()
    }
}

impl TryFrom<String> for Route {
    type Error = NavigationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

// =============================================================================
// Destinations
// =============================================================================

/// Per-destination UI state that survives re-visits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransientState {
    /// Scroll position to restore
    #[serde(default)]
    pub scroll_position: f32,
    /// Unsaved form input keyed by field name
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

/// A live instance of a route on the back stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
    /// Index in the back stack
    pub position: usize,
    /// Transient UI state
    #[serde(default)]
    pub state: TransientState,
}

impl Destination {
    fn new(route: Route, position: usize) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
            position,
            state: TransientState::default(),
        }
    }
}

// =============================================================================
// Back Stack
// =============================================================================

/// Ordered history of destinations, most recent last
///
/// The bottom entry is always the start destination and is never popped.
/// Serializes as the list of entries; an empty list is rejected on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Destination>", into = "Vec<Destination>")]
pub struct BackStack {
    entries: Vec<Destination>,
}

impl TryFrom<Vec<Destination>> for BackStack {
    type Error = NavigationError;

    fn try_from(mut entries: Vec<Destination>) -> Result<Self> {
        if entries.is_empty() {
            return Err(NavigationError::EmptyStack);
        }
        for (position, destination) in entries.iter_mut().enumerate() {
            destination.position = position;
        }
        Ok(Self { entries })
    }
}

impl From<BackStack> for Vec<Destination> {
    fn from(stack: BackStack) -> Self {
        stack.entries
    }
}

impl BackStack {
    /// Create a stack holding only the start route
    pub fn new(start: Route) -> Self {
        Self {
            entries: vec![Destination::new(start, 0)],
        }
    }

    fn push(&mut self, route: Route) {
        let position = self.entries.len();
        self.entries.push(Destination::new(route, position));
    }

    fn pop(&mut self) -> Result<Destination> {
        if self.entries.len() > 1 {
            self.entries.pop().ok_or(NavigationError::EmptyStack)
        } else {
            Err(NavigationError::EmptyStack)
        }
    }

    /// Remove everything above the start destination
    fn truncate_to_start(&mut self) -> Vec<Destination> {
        self.entries.split_off(1)
    }

    fn extend(&mut self, restored: Vec<Destination>) {
        for mut destination in restored {
            destination.position = self.entries.len();
            self.entries.push(destination);
        }
    }

    /// Get the start destination
    pub fn start(&self) -> &Destination {
        &self.entries[0]
    }

    /// Get the current (top) destination
    pub fn current(&self) -> &Destination {
        self.entries.last().unwrap_or(&self.entries[0])
    }

    fn current_mut(&mut self) -> &mut Destination {
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Get all entries
    pub fn entries(&self) -> &[Destination] {
        &self.entries
    }

    /// Routes from bottom to top
    pub fn snapshot(&self) -> Vec<Route> {
        self.entries.iter().map(|d| d.route).collect()
    }
}

// =============================================================================
// Navigation Options and Events
// =============================================================================

/// Stack-management options for a navigate call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavOptions {
    /// Truncate the stack back to the start destination before pushing
    pub pop_up_to_start: bool,
    /// Cache the destinations popped by `pop_up_to_start`
    pub save_state: bool,
    /// Restore a cached segment for the target instead of pushing fresh
    pub restore_state: bool,
    /// Do nothing if the target is already on top
    pub single_top: bool,
}

impl NavOptions {
    /// Options used for drawer and bottom-bar destinations
    pub fn top_level() -> Self {
        Self {
            pop_up_to_start: true,
            save_state: true,
            restore_state: true,
            single_top: true,
        }
    }

    /// Set pop-up-to-start
    pub fn with_pop_up_to_start(mut self, value: bool) -> Self {
        self.pop_up_to_start = value;
        self
    }

    /// Set save state
    pub fn with_save_state(mut self, value: bool) -> Self {
        self.save_state = value;
        self
    }

    /// Set restore state
    pub fn with_restore_state(mut self, value: bool) -> Self {
        self.restore_state = value;
        self
    }

    /// Set single top
    pub fn with_single_top(mut self, value: bool) -> Self {
        self.single_top = value;
        self
    }
}

/// How the current destination came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// A fresh destination was pushed
    Push,
    /// The top destination was popped
    Pop,
    /// A saved segment was restored
    Restore,
    /// Single-top matched the existing top
    Reuse,
}

/// Emitted after every successful navigate or pop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationChanged {
    /// Route that was on top before the change
    pub previous: Route,
    /// Route now on top
    pub current: Route,
    /// Kind of transition
    pub kind: TransitionKind,
    /// Stack depth after the change
    pub depth: usize,
}

/// Receives destination changes synchronously
#[cfg_attr(test, mockall::automock)]
pub trait NavigationObserver {
    /// Called after the back stack has changed
    fn on_destination_changed(&self, event: &DestinationChanged);
}

// =============================================================================
// Navigation Controller
// =============================================================================

/// Owns the back stack and exposes navigate/pop
pub struct NavController {
    registry: Rc<RouteRegistry>,
    stack: BackStack,
    saved: HashMap<Route, Vec<Destination>>,
    observers: Vec<Rc<dyn NavigationObserver>>,
}

impl fmt::Debug for NavController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavController")
            .field("stack", &self.stack.snapshot())
            .field("saved", &self.saved.keys().collect::<Vec<_>>())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl NavController {
    /// Create a controller positioned at the registry's start route
    pub fn new(registry: Rc<RouteRegistry>) -> Self {
        let stack = BackStack::new(registry.start_route());
        Self {
            registry,
            stack,
            saved: HashMap::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer
    pub fn subscribe(&mut self, observer: Rc<dyn NavigationObserver>) {
        self.observers.push(observer);
    }

    /// Get the route registry
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Get the back stack
    pub fn back_stack(&self) -> &BackStack {
        &self.stack
    }

    /// Get the current destination
    pub fn current(&self) -> &Destination {
        self.stack.current()
    }

    /// Get the current route
    pub fn current_route(&self) -> Route {
        self.stack.current().route
    }

    /// Update the transient state of the current destination
    pub fn update_state(&mut self, update: impl FnOnce(&mut TransientState)) {
        update(&mut self.stack.current_mut().state);
    }

    /// Check whether a segment is cached for `route`
    pub fn has_saved_state(&self, route: Route) -> bool {
        self.saved.contains_key(&route)
    }

    /// Navigate to a route
    ///
    /// # Panics
    ///
    /// Panics if `target` is not registered; routes are a closed set, so this
    /// is a configuration bug.
    pub fn navigate(&mut self, target: Route, options: NavOptions) -> &Destination {
        assert!(
            self.registry.contains(target),
            "navigate to unregistered route `{target}`"
        );

        let previous = self.current_route();

        if options.single_top && previous == target {
            tracing::debug!(route = %target, "single-top navigation reused current destination");
            self.notify(previous, TransitionKind::Reuse);
            return self.stack.current();
        }

        if options.pop_up_to_start {
            let popped = self.stack.truncate_to_start();
            if options.save_state {
                if let Some(first) = popped.first() {
                    tracing::debug!(
                        segment = %first.route,
                        entries = popped.len(),
                        "saved popped back stack segment"
                    );
                    self.saved.insert(first.route, popped);
                }
            }
        }

        let kind = if options.single_top && self.current_route() == target {
            // popping back to start can uncover the target itself
            TransitionKind::Reuse
        } else if let Some(segment) = options
            .restore_state
            .then(|| self.saved.remove(&target))
            .flatten()
        {
            self.stack.extend(segment);
            TransitionKind::Restore
        } else {
            self.stack.push(target);
            TransitionKind::Push
        };

        tracing::debug!(
            from = %previous,
            to = %self.current_route(),
            depth = self.stack.depth(),
            ?kind,
            "navigated"
        );
        self.notify(previous, kind);
        self.stack.current()
    }

    /// Pop the current destination
    pub fn pop(&mut self) -> Result<Destination> {
        let previous = self.current_route();
        match self.stack.pop() {
            Ok(popped) => {
                tracing::debug!(from = %previous, to = %self.current_route(), "popped");
                self.notify(previous, TransitionKind::Pop);
                Ok(popped)
            }
            Err(err) => {
                tracing::warn!(route = %previous, "rejected pop of start destination");
                Err(err)
            }
        }
    }

    fn notify(&self, previous: Route, kind: TransitionKind) {
        let event = DestinationChanged {
            previous,
            current: self.current_route(),
            kind,
            depth: self.stack.depth(),
        };
        for observer in &self.observers {
            observer.on_destination_changed(&event);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
