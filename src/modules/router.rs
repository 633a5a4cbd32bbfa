// Command routing - pure logic, no Tauri imports.
// Every toolbar/tab-strip action arrives as a tagged `Intent` and maps to exactly one
// `TabManager` call. Nothing is queued: the call happens before `dispatch` returns.

use serde::{Deserialize, Serialize};

use super::navigation::NavigationCommand;
use super::surface::{SurfaceEvent, SurfaceFactory, SurfaceId};
use super::tabs::{CloseOutcome, TabManager};
use crate::error::ShellResult;
use crate::state::ChromeUpdate;

/// A UI action, as posted by the chrome (`{"intent": "close-tab", "index": 2}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "kebab-case")]
pub enum Intent {
    NewTab,
    CloseTab { index: usize },
    SelectTab { index: usize },
    Split,
    Home,
    SearchSubmit,
    Back,
    Forward,
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Continue,
    /// The last tab closed; the application should quit.
    Exit,
}

pub struct CommandRouter<F: SurfaceFactory> {
    manager: TabManager<F>,
}

impl<F: SurfaceFactory> CommandRouter<F> {
    pub fn new(manager: TabManager<F>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &TabManager<F> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut TabManager<F> {
        &mut self.manager
    }

    pub fn dispatch(&mut self, intent: Intent) -> ShellResult<RouteOutcome> {
        log::debug!("[Router] {:?}", intent);
        let manager = &mut self.manager;

        match intent {
            Intent::NewTab => {
                let url = manager.settings().new_tab_url().to_string();
                manager.create_tab(&url)?;
            }
            Intent::CloseTab { index } => {
                if manager.close_tab(index)? == CloseOutcome::Terminated {
                    return Ok(RouteOutcome::Exit);
                }
            }
            Intent::SelectTab { index } => manager.select_tab(index)?,
            Intent::Split => {
                let url = manager.settings().split_url().to_string();
                manager.split_active(&url)?;
            }
            Intent::SearchSubmit => {
                let query = manager.address_bar_text().to_string();
                manager.dispatch_navigation(&NavigationCommand::Search(query))?;
            }
            Intent::Home => {
                manager.dispatch_navigation(&NavigationCommand::Home)?;
            }
            Intent::Back => {
                manager.dispatch_navigation(&NavigationCommand::Back)?;
            }
            Intent::Forward => {
                manager.dispatch_navigation(&NavigationCommand::Forward)?;
            }
            Intent::Reload => {
                manager.dispatch_navigation(&NavigationCommand::Reload)?;
            }
        }
        Ok(RouteOutcome::Continue)
    }

    pub fn on_surface_event(&mut self, id: SurfaceId, event: SurfaceEvent) -> Option<ChromeUpdate> {
        self.manager.on_surface_event(id, event)
    }
}
