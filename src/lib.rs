//! Workout tracker application bootstrap
//!
//! Wires the service container and the navigation shell together. Build an
//! [`App`] once at process start and keep it on the UI thread.
//!
//! ```rust
//! use workout::{App, AppConfig};
//! use app_ui::{Destination, Route, ScreenRegistry};
//!
//! let screens = Route::ALL.iter().fold(ScreenRegistry::new(), |screens, route| {
//!     screens.register(*route, |dest: &Destination| dest.route)
//! });
//! let mut app = App::new(AppConfig::default(), screens).unwrap();
//! app.shell_mut().navigate(Route::Settings);
//! assert_eq!(app.shell().render().content, Route::Settings);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use app_ui::{RouteRegistry, ScreenRegistry, ShellComposer, ShellError};
use networking::{AppContainer, ContainerConfig, NetworkError};
use tracing_subscriber::EnvFilter;

/// Bootstrap errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Navigation shell could not be built
    #[error("Shell error: {0}")]
    Shell(#[from] ShellError),

    /// Service container could not be built
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

/// Result type for bootstrap
pub type Result<T> = std::result::Result<T, AppError>;

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service container settings
    pub container: ContainerConfig,
    /// Filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            container: ContainerConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Set the container configuration
    pub fn with_container(mut self, container: ContainerConfig) -> Self {
        self.container = container;
        self
    }

    /// Set the fallback log filter
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `fallback`. Calling this more than once is harmless.
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Running application
#[derive(Debug)]
pub struct App<C> {
    container: AppContainer,
    shell: ShellComposer<C>,
}

impl<C> App<C> {
    /// Build the container and the shell with the standard route registry
    pub fn new(config: AppConfig, screens: ScreenRegistry<C>) -> Result<Self> {
        Self::with_registry(config, RouteRegistry::standard(), screens)
    }

    /// Build with a custom route registry
    pub fn with_registry(
        config: AppConfig,
        registry: RouteRegistry,
        screens: ScreenRegistry<C>,
    ) -> Result<Self> {
        let container = AppContainer::init(config.container)?;
        let shell = ShellComposer::new(registry, screens)?;
        tracing::info!(start = %shell.current_route(), "application started");
        Ok(Self { container, shell })
    }

    /// Get the service container
    pub fn container(&self) -> &AppContainer {
        &self.container
    }

    /// Get the navigation shell
    pub fn shell(&self) -> &ShellComposer<C> {
        &self.shell
    }

    /// Get the navigation shell mutably
    pub fn shell_mut(&mut self) -> &mut ShellComposer<C> {
        &mut self.shell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_ui::{Destination, Route};

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing("debug");
        init_tracing("warn");
        tracing::debug!("subscriber installed");
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default()
            .with_log_filter("workout=debug")
            .with_container(ContainerConfig::new("https://example.org"));
        assert_eq!(config.log_filter, "workout=debug");
        assert_eq!(config.container.base_url, "https://example.org");
    }

    #[test]
    fn test_missing_screen_is_shell_error() {
        let screens = ScreenRegistry::new().register(Route::Home, |_: &Destination| ());
        let err = App::new(AppConfig::default(), screens).unwrap_err();
        assert!(matches!(err, AppError::Shell(ShellError::MissingScreen(_))));
    }
}
