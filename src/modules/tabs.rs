// Tab management - pure logic, no Tauri imports.
//
// Owns the tab strip: one `SplitPane` per tab, the active index, and the address bar
// text. Navigation fans out to every surface of the active tab; surface notifications
// come back through `on_surface_event` and become `ChromeUpdate`s.

use super::layout::Rect;
use super::navigation::NavigationCommand;
use super::pane::SplitPane;
use super::surface::{RenderSurface, SurfaceEvent, SurfaceFactory, SurfaceId};
use crate::error::{ShellError, ShellResult};
use crate::settings::Settings;
use crate::state::{ChromeUpdate, TabSnapshot, TabStripSnapshot};

/// Label shown until the first page of a tab finishes loading.
pub const PLACEHOLDER_LABEL: &str = "New Tab";

pub struct TabEntry<S> {
    pane: SplitPane<S>,
    label: String,
    last_url: Option<String>,
}

impl<S> TabEntry<S> {
    pub fn pane(&self) -> &SplitPane<S> {
        &self.pane
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// URL most recently reported by any surface of this tab.
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A tab was removed; `active` is the index of the tab now active.
    Closed { active: usize },
    /// The last tab was closed. The session is over and the manager is empty.
    Terminated,
}

pub struct TabManager<F: SurfaceFactory> {
    factory: F,
    settings: Settings,
    tabs: Vec<TabEntry<F::Surface>>,
    active: usize,
    next_surface: u64,
    address_bar: String,
    content_area: Option<Rect>,
    terminated: bool,
}

impl<F: SurfaceFactory> TabManager<F> {
    /// Creates an empty manager. The shell opens the first tab right away; until then,
    /// and after the last tab closes, there is no active pane.
    pub fn new(factory: F, settings: Settings) -> Self {
        Self {
            factory,
            settings,
            tabs: Vec::new(),
            active: 0,
            next_surface: 0,
            address_bar: String::new(),
            content_area: None,
            terminated: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn active_index(&self) -> Option<usize> {
        (!self.tabs.is_empty()).then_some(self.active)
    }

    pub fn tab(&self, index: usize) -> Option<&TabEntry<F::Surface>> {
        self.tabs.get(index)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn address_bar_text(&self) -> &str {
        &self.address_bar
    }

    /// Called by the UI when the user edits the address bar.
    pub fn set_address_bar_text(&mut self, text: impl Into<String>) {
        self.address_bar = text.into();
    }

    pub fn set_tab_label(&mut self, index: usize, label: impl Into<String>) -> ShellResult<()> {
        ShellError::check_index(index, self.tabs.len())?;
        self.tabs[index].label = label.into();
        Ok(())
    }

    fn allocate_surface(&mut self) -> ShellResult<(SurfaceId, F::Surface)> {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        let surface = self.factory.create(id)?;
        Ok((id, surface))
    }

    /// Opens a tab showing `initial_url` and makes it active. Returns its index.
    pub fn create_tab(&mut self, initial_url: &str) -> ShellResult<usize> {
        if self.terminated {
            return Err(ShellError::InvalidState("session terminated"));
        }
        let (id, surface) = self.allocate_surface()?;
        self.tabs.push(TabEntry {
            pane: SplitPane::create(id, surface, initial_url),
            label: PLACEHOLDER_LABEL.to_string(),
            last_url: None,
        });
        self.active = self.tabs.len() - 1;
        self.restore_address_bar();
        self.relayout();

        log::info!("[Tabs] Opened tab {} with {} at {}", self.active, id, initial_url);
        Ok(self.active)
    }

    /// Closes the tab at `index`.
    ///
    /// When the active tab closes, the tab that slides into its position becomes active,
    /// or the new last tab if it was the rightmost one. Closing the only tab ends the session.
    pub fn close_tab(&mut self, index: usize) -> ShellResult<CloseOutcome> {
        ShellError::check_index(index, self.tabs.len())?;

        if self.tabs.len() == 1 {
            self.tabs.clear();
            self.active = 0;
            self.terminated = true;
            log::info!("[Tabs] Closed last tab, terminating session");
            return Ok(CloseOutcome::Terminated);
        }

        let removed = self.tabs.remove(index);
        log::info!("[Tabs] Closed tab {} ({} surfaces released)", index, removed.pane.len());
        drop(removed);

        if index < self.active {
            self.active -= 1;
        } else if index == self.active {
            self.active = self.active.min(self.tabs.len() - 1);
            self.restore_address_bar();
        }
        self.relayout();
        Ok(CloseOutcome::Closed { active: self.active })
    }

    /// Makes the tab at `index` active.
    pub fn select_tab(&mut self, index: usize) -> ShellResult<()> {
        ShellError::check_index(index, self.tabs.len())?;
        if index == self.active {
            return Ok(());
        }
        self.active = index;
        self.restore_address_bar();
        self.relayout();
        log::debug!("[Tabs] Selected tab {}", index);
        Ok(())
    }

    /// Shows the active tab's last reported URL, or nothing if it hasn't reported one yet.
    fn restore_address_bar(&mut self) {
        self.address_bar = self
            .tabs
            .get(self.active)
            .and_then(|tab| tab.last_url.clone())
            .unwrap_or_default();
    }

    pub fn active_pane(&self) -> ShellResult<&SplitPane<F::Surface>> {
        self.tabs
            .get(self.active)
            .map(|tab| &tab.pane)
            .ok_or(ShellError::InvalidState("no active tab"))
    }

    pub fn active_pane_mut(&mut self) -> ShellResult<&mut SplitPane<F::Surface>> {
        self.tabs
            .get_mut(self.active)
            .map(|tab| &mut tab.pane)
            .ok_or(ShellError::InvalidState("no active tab"))
    }

    /// Adds a surface showing `url` to the right of the active tab's pane.
    pub fn split_active(&mut self, url: &str) -> ShellResult<SurfaceId> {
        self.active_pane()?;
        let (id, surface) = self.allocate_surface()?;
        let pane = self.active_pane_mut()?;
        pane.add_surface(id, surface, url);
        let count = pane.len();
        self.relayout();

        log::info!("[Tabs] Split tab {}: {} at {} ({} surfaces)", self.active, id, url, count);
        Ok(id)
    }

    /// Applies `command` to every surface of the active tab. Returns how many were driven.
    pub fn dispatch_navigation(&mut self, command: &NavigationCommand) -> ShellResult<usize> {
        let op = command.resolve(&self.settings);
        let pane = self.active_pane_mut()?;
        let mut count = 0;
        for surface in pane.surfaces_mut() {
            op.apply(surface);
            count += 1;
        }
        log::debug!("[Tabs] {:?} -> {} surfaces", op, count);
        Ok(count)
    }

    fn owner_of(&self, id: SurfaceId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.pane.contains(id))
    }

    /// Folds a surface notification into tab state.
    ///
    /// With several surfaces in one pane, whichever notification arrives last wins,
    /// in the order the engine delivers them. Events from released surfaces are dropped.
    pub fn on_surface_event(&mut self, id: SurfaceId, event: SurfaceEvent) -> Option<ChromeUpdate> {
        let Some(index) = self.owner_of(id) else {
            log::debug!("[Tabs] Dropping {:?} from unknown {}", event, id);
            return None;
        };
        let tab = &mut self.tabs[index];

        match event {
            SurfaceEvent::UrlChanged(url) => {
                tab.last_url = Some(url.clone());
                if index != self.active {
                    return None;
                }
                self.address_bar = url.clone();
                Some(ChromeUpdate::AddressBar { text: url })
            }
            SurfaceEvent::TitleChanged(title) => {
                tab.label = title.clone();
                Some(ChromeUpdate::TabLabel { index, label: title })
            }
            SurfaceEvent::LoadFinished { ok } => {
                if !ok {
                    log::warn!("[Tabs] {} in tab {} finished with a load error", id, index);
                }
                let title = tab
                    .pane
                    .surface(id)
                    .and_then(RenderSurface::current_title)
                    .unwrap_or_default();
                tab.label = title.clone();
                Some(ChromeUpdate::TabLabel { index, label: title })
            }
        }
    }

    /// Sets the window region content surfaces live in and lays them out.
    pub fn set_content_area(&mut self, area: Rect) {
        self.content_area = Some(area);
        self.relayout();
    }

    /// Drags divider `divider` of the active pane by `delta` pixels.
    pub fn resize_divider(&mut self, divider: usize, delta: f64) -> ShellResult<()> {
        let width = self.content_area.map(|area| area.width).unwrap_or(0.0);
        let min_width = self.settings.min_pane_width;
        self.active_pane_mut()?.resize_divider(divider, delta, width, min_width)?;
        self.relayout();
        Ok(())
    }

    fn relayout(&mut self) {
        let Some(area) = self.content_area else {
            return;
        };
        for (i, tab) in self.tabs.iter_mut().enumerate() {
            if i == self.active {
                tab.pane.place(area);
            } else {
                tab.pane.hide();
            }
        }
    }

    pub fn snapshot(&self) -> TabStripSnapshot {
        TabStripSnapshot {
            tabs: self
                .tabs
                .iter()
                .map(|tab| TabSnapshot {
                    label: tab.label.clone(),
                    surface_count: tab.pane.len(),
                    last_url: tab.last_url.clone(),
                })
                .collect(),
            active_index: self.active_index(),
            address_bar: self.address_bar.clone(),
        }
    }
}
