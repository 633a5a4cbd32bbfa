// In-memory surfaces for unit tests.

use std::cell::Cell;
use std::rc::Rc;

use super::layout::Rect;
use super::surface::{RenderSurface, SurfaceFactory, SurfaceId};
use crate::error::{ShellError, ShellResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Navigate(String),
    Back,
    Forward,
    Reload,
}

/// Records every engine call. Navigating sets the URL and a title derived from it.
/// Bumps `drops` when released.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub bounds: Option<Rect>,
    pub drops: Rc<Cell<usize>>,
}

impl Drop for RecordingSurface {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

impl RecordingSurface {
    pub fn navigations(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Navigate(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn navigate(&mut self, url: &str) {
        self.calls.push(SurfaceCall::Navigate(url.to_string()));
        self.url = Some(url.to_string());
        self.title = Some(format!("Title of {}", url));
    }

    fn back(&mut self) {
        self.calls.push(SurfaceCall::Back);
    }

    fn forward(&mut self) {
        self.calls.push(SurfaceCall::Forward);
    }

    fn reload(&mut self) {
        self.calls.push(SurfaceCall::Reload);
    }

    fn current_url(&self) -> Option<String> {
        self.url.clone()
    }

    fn current_title(&self) -> Option<String> {
        self.title.clone()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }
}

/// Hands out `RecordingSurface`s; can be told to fail the next creation.
/// Every surface it creates shares the factory's `drops` counter.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    pub created: Vec<SurfaceId>,
    pub fail_next: bool,
    pub drops: Rc<Cell<usize>>,
}

impl SurfaceFactory for RecordingFactory {
    type Surface = RecordingSurface;

    fn create(&mut self, id: SurfaceId) -> ShellResult<RecordingSurface> {
        if std::mem::take(&mut self.fail_next) {
            return Err(ShellError::surface_creation("engine unavailable"));
        }
        self.created.push(id);
        let mut surface = RecordingSurface::default();
        surface.drops = Rc::clone(&self.drops);
        Ok(surface)
    }
}
