// Render surface contract - pure logic, no Tauri imports.
//
// The core never renders anything itself. It drives surfaces through this trait and
// learns about their progress through `SurfaceEvent`s tagged with a `SurfaceId`.

use serde::{Deserialize, Serialize};

use super::layout::Rect;
use crate::error::ShellResult;

/// Identifies one rendering instance for the lifetime of a `TabManager`. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// One embedded web page. Calls are fire-and-forget: completion comes back as events.
pub trait RenderSurface {
    /// Starts loading `url`, abandoning any load still in flight.
    fn navigate(&mut self, url: &str);
    fn back(&mut self);
    fn forward(&mut self);
    fn reload(&mut self);
    fn current_url(&self) -> Option<String>;
    fn current_title(&self) -> Option<String>;

    /// Places the surface on screen. Surfaces without a geometry of their own ignore it.
    fn set_bounds(&mut self, _bounds: Rect) {}
}

/// Creates surfaces on behalf of the manager.
pub trait SurfaceFactory {
    type Surface: RenderSurface;

    /// Instantiates a blank surface. The caller navigates it.
    fn create(&mut self, id: SurfaceId) -> ShellResult<Self::Surface>;
}

/// State-change notification emitted by a surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    UrlChanged(String),
    TitleChanged(String),
    /// `ok == false` is an engine-side load failure. The engine usually shows an
    /// error page whose title is still worth mirroring.
    LoadFinished { ok: bool },
}
