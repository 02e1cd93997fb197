//! Navigation Scenario Tests
//!
//! End-to-end walks through the shell: drawer, bottom bar, multi-action
//! button and system back, driven the way a user would.

use app_ui::{
    BackOutcome, Destination, FabVariant, FabView, MultiFabState, NavIcon, Route,
    RouteRegistry, ScreenRegistry, ShellComposer,
};
use workout::{App, AppConfig};

/// Screen content used by these tests: the route key and stack position
#[derive(Debug, Clone, PartialEq)]
struct Screen {
    key: &'static str,
    position: usize,
    scroll: f32,
}

fn screens() -> ScreenRegistry<Screen> {
    Route::ALL.iter().fold(ScreenRegistry::new(), |screens, route| {
        screens.register(*route, |dest: &Destination| Screen {
            key: dest.route.key(),
            position: dest.position,
            scroll: dest.state.scroll_position,
        })
    })
}

fn app() -> App<Screen> {
    App::new(AppConfig::default(), screens()).unwrap()
}

fn drawer_index(shell: &ShellComposer<Screen>, route: Route) -> usize {
    shell
        .registry()
        .drawer_items()
        .iter()
        .position(|item| item.route == Some(route))
        .unwrap()
}

/// Home -> programs -> programs again -> edit day -> multi-action -> exercise selection
#[test]
fn test_program_editing_walkthrough() {
    let mut app = app();
    let shell = app.shell_mut();
    assert_eq!(shell.current_route(), Route::Home);

    let programs = drawer_index(shell, Route::WorkoutPrograms);
    shell.open_drawer();
    shell.tap_drawer_item(programs);
    assert_eq!(
        shell.nav().back_stack().snapshot(),
        vec![Route::Home, Route::WorkoutPrograms]
    );

    // tapping the same drawer entry again is single-top
    shell.open_drawer();
    shell.tap_drawer_item(programs);
    assert_eq!(
        shell.nav().back_stack().snapshot(),
        vec![Route::Home, Route::WorkoutPrograms]
    );

    shell.navigate(Route::EditDay);
    assert_eq!(shell.chrome().fab_variant, FabVariant::MultiAdd);
    assert_eq!(shell.multi_fab_state(), MultiFabState::Collapsed);

    shell.tap_fab();
    assert_eq!(shell.multi_fab_state(), MultiFabState::Expanded);

    shell.tap_multi_fab_item("addExercise");
    assert_eq!(shell.current_route(), Route::ExerciseSelection);
    assert_eq!(shell.multi_fab_state(), MultiFabState::Collapsed);

    let frame = shell.render();
    assert_eq!(frame.fab, FabView::None);
    assert_eq!(frame.top_bar.nav_icon, NavIcon::BackArrow);
    assert_eq!(frame.top_bar.elevation, 0.0);
    assert!(frame.bottom_bar.is_none());
    assert_eq!(frame.content.position, 3);
}

/// One-rep-max setup shows the fixed setup title over a flat app bar
#[test]
fn test_one_rep_max_chrome() {
    let mut app = app();
    let shell = app.shell_mut();
    shell.tap_drawer_item(drawer_index(shell, Route::WorkoutPrograms));
    shell.navigate(Route::OneRepMax);

    let chrome = shell.chrome();
    assert_eq!(chrome.app_bar_title, "Programs Setup");
    assert_eq!(chrome.app_bar_elevation, 0.0);
    assert!(chrome.show_back_arrow);

    let frame = shell.render();
    assert_eq!(frame.top_bar.title, "Programs Setup");
    assert_eq!(frame.content.key, "programs/one_rep_max");
}

/// Switching tabs keeps one instance of each top-level destination and
/// brings back the state of the segment that was left
#[test]
fn test_tab_switching_restores_state() {
    let mut app = app();
    let shell = app.shell_mut();

    assert_eq!(shell.tap_bottom_item(1), Some(Route::Progress));
    shell.update_state(|state| state.scroll_position = 512.0);

    assert_eq!(shell.tap_bottom_item(2), Some(Route::History));
    assert_eq!(
        shell.nav().back_stack().snapshot(),
        vec![Route::Home, Route::History]
    );

    assert_eq!(shell.tap_bottom_item(1), Some(Route::Progress));
    assert_eq!(
        shell.nav().back_stack().snapshot(),
        vec![Route::Home, Route::Progress]
    );
    assert_eq!(shell.render().content.scroll, 512.0);

    let bottom = shell.render().bottom_bar.unwrap();
    let selected: Vec<_> = bottom
        .iter()
        .filter(|item| item.selected)
        .map(|item| item.route)
        .collect();
    assert_eq!(selected, vec![Route::Progress]);
}

/// Drawer selection tracks the ancestor of nested settings pages
#[test]
fn test_settings_pages_highlight_settings() {
    let mut app = app();
    let shell = app.shell_mut();
    shell.tap_drawer_item(drawer_index(shell, Route::Settings));
    shell.navigate(Route::DataManagement);

    assert_eq!(shell.chrome().selected_drawer_item, Some(Route::Settings));
    assert!(shell.chrome().show_back_arrow);

    shell.tap_nav_icon();
    assert_eq!(shell.current_route(), Route::Settings);
    assert_eq!(shell.render().top_bar.nav_icon, NavIcon::Drawer);
}

/// Back presses unwind to the start destination, then ask the host to exit
#[test]
fn test_system_back_unwinds_to_exit() {
    let mut app = app();
    let shell = app.shell_mut();
    shell.tap_drawer_item(drawer_index(shell, Route::GoogleSync));
    shell.navigate(Route::GoogleSyncSettings);

    assert_eq!(shell.system_back(), BackOutcome::Handled);
    assert_eq!(shell.current_route(), Route::GoogleSync);
    assert_eq!(shell.system_back(), BackOutcome::Handled);
    assert_eq!(shell.current_route(), Route::Home);
    assert_eq!(shell.system_back(), BackOutcome::Exit);
    assert_eq!(shell.nav().back_stack().depth(), 1);
}

/// Pop-to-start always leaves exactly the start destination plus the target
#[test]
fn test_pop_up_to_start_depth() {
    let mut app = app();
    let shell = app.shell_mut();
    for route in [
        Route::WorkoutPrograms,
        Route::CreateProgram,
        Route::EditDay,
        Route::ExerciseSelection,
    ] {
        shell.navigate(route);
    }
    assert_eq!(shell.nav().back_stack().depth(), 5);

    shell.tap_drawer_item(drawer_index(shell, Route::Faq));
    assert_eq!(shell.nav().back_stack().snapshot(), vec![Route::Home, Route::Faq]);
    assert_eq!(shell.nav().back_stack().start().route, Route::Home);
}

/// A custom registry restricts navigation to its own routes
#[test]
fn test_custom_registry() {
    let registry = RouteRegistry::builder()
        .routes([Route::Home, Route::Progress])
        .build()
        .unwrap();
    let screens = ScreenRegistry::new()
        .register(Route::Home, |_: &Destination| "home")
        .register(Route::Progress, |_: &Destination| "progress");

    let mut app = App::with_registry(AppConfig::default(), registry, screens).unwrap();
    assert!(app.shell().render().bottom_bar.is_none());
    assert_eq!(app.shell().render().drawer.len(), 0);

    app.shell_mut().navigate(Route::Progress);
    app.shell_mut().navigate(Route::Progress);
    assert_eq!(app.shell().render().content, "progress");
    assert_eq!(app.shell().nav().back_stack().depth(), 3);
}

/// Frames serialize for the frontend
#[test]
fn test_chrome_serializes() {
    let app = app();
    let json = serde_json::to_value(app.shell().chrome()).unwrap();
    assert_eq!(json["fab_variant"], "single_add");
    assert_eq!(json["bottom_bar_visible"], true);
    assert_eq!(json["selected_bottom_item"], "home");
}

/// Network logging flag reaches the HTTP client
#[test]
fn test_container_configured_once() {
    let config = AppConfig::default()
        .with_container(networking::ContainerConfig::default().with_network_logs(true));
    let app = App::new(config, screens()).unwrap();
    assert!(app.container().http_client().config().enable_logs);
}
