// Pure navigation logic - no Tauri imports allowed.
// Turns toolbar navigation commands into the engine call each surface receives.

use serde::{Deserialize, Serialize};

use super::surface::RenderSurface;
use crate::settings::Settings;

/// A navigation applied in lockstep to every surface of the active tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationCommand {
    Back,
    Forward,
    Reload,
    Home,
    Search(String),
}

/// The single engine call one surface receives for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOp {
    Back,
    Forward,
    Reload,
    Navigate(String),
}

impl NavigationCommand {
    /// Resolves home and search targets against `settings`.
    ///
    /// Resolution happens once per dispatch so every surface gets the same URL.
    pub fn resolve(&self, settings: &Settings) -> EngineOp {
        match self {
            Self::Back => EngineOp::Back,
            Self::Forward => EngineOp::Forward,
            Self::Reload => EngineOp::Reload,
            Self::Home => EngineOp::Navigate(settings.homepage.clone()),
            Self::Search(query) => EngineOp::Navigate(settings.search_url(query)),
        }
    }
}

impl EngineOp {
    pub fn apply<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        match self {
            Self::Back => surface.back(),
            Self::Forward => surface.forward(),
            Self::Reload => surface.reload(),
            Self::Navigate(url) => surface.navigate(url),
        }
    }
}
