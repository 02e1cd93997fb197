//! Navigation shell for the workout tracker
//!
//! This crate owns the routing core: which screen is shown, how the back
//! stack behaves, and which chrome (app bar, drawer, bottom bar, floating
//! action button) surrounds the current screen.
//!
//! # Modules
//!
//! - [`navigation`] - Routes, back stack and the navigation controller
//! - [`registry`] - Static route catalog, drawer and bottom-nav entries
//! - [`chrome`] - Chrome policy derived from the current route
//! - [`shell`] - Shell composer that renders frames and dispatches taps
//!
//! # Example
//!
//! ```rust
//! use app_ui::{Destination, Route, RouteRegistry, ScreenRegistry, ShellComposer};
//!
//! let screens = Route::ALL.iter().fold(ScreenRegistry::new(), |screens, route| {
//!     screens.register(*route, |dest: &Destination| dest.route.key().to_string())
//! });
//! let mut shell = ShellComposer::new(RouteRegistry::standard(), screens).unwrap();
//!
//! shell.navigate(Route::EditDay);
//! shell.tap_fab();
//! shell.tap_multi_fab_item("addExercise");
//! assert_eq!(shell.current_route(), Route::ExerciseSelection);
//! assert!(shell.chrome().show_back_arrow);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chrome;
pub mod navigation;
pub mod registry;
pub mod shell;

// Re-export commonly used types
pub use chrome::{
    derive_chrome_state, ChromeState, ChromeTracker, FabVariant, MultiFabItem, MultiFabState,
    FLAT_ELEVATION, PROGRAMS_SETUP_TITLE, STANDARD_ELEVATION,
};

pub use navigation::{
    BackStack, Destination, DestinationChanged, NavController, NavOptions, NavigationError,
    NavigationObserver, Route, RouteGroup, TransientState, TransitionKind,
};

pub use registry::{BottomNavItem, DrawerItem, RegistryError, RouteRegistry, RouteRegistryBuilder};

pub use shell::{
    BackOutcome, BottomBarItem, DrawerRow, FabView, NavIcon, ScreenFactory, ScreenRegistry,
    ShellComposer, ShellError, ShellFrame, TopBar,
};
