// Split pane - pure logic, no Tauri imports.
// An ordered, grow-only row of surfaces shown side by side inside one tab.

use super::layout::{self, Rect};
use super::surface::{RenderSurface, SurfaceId};
use crate::error::{ShellError, ShellResult};

/// One surface plus the share of the pane's width it occupies.
pub struct PaneSlot<S> {
    pub id: SurfaceId,
    pub surface: S,
    weight: f64,
}

/// Surfaces in left-to-right order. Never empty, never shrinks.
pub struct SplitPane<S> {
    slots: Vec<PaneSlot<S>>,
}

impl<S: RenderSurface> SplitPane<S> {
    /// Creates a pane holding `surface`, navigated to `initial_url`.
    pub fn create(id: SurfaceId, surface: S, initial_url: &str) -> Self {
        let mut pane = Self { slots: Vec::with_capacity(1) };
        pane.add_surface(id, surface, initial_url);
        pane
    }

    /// Appends `surface` on the right, navigated to `url`, with an equal share of the width.
    pub fn add_surface(&mut self, id: SurfaceId, mut surface: S, url: &str) -> SurfaceId {
        surface.navigate(url);
        self.slots.push(PaneSlot { id, surface, weight: 1.0 });
        id
    }

    pub fn surfaces(&self) -> &[PaneSlot<S>] {
        &self.slots
    }

    pub(crate) fn surfaces_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.slots.iter_mut().map(|slot| &mut slot.surface)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.slots.iter().map(|slot| slot.id)
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&S> {
        self.slots.iter().find(|slot| slot.id == id).map(|slot| &slot.surface)
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut S> {
        self.slots.iter_mut().find(|slot| slot.id == id).map(|slot| &mut slot.surface)
    }

    /// Column for each surface when the pane fills `area`, in surface order.
    pub fn layout(&self, area: Rect) -> Vec<Rect> {
        let weights: Vec<f64> = self.slots.iter().map(|slot| slot.weight).collect();
        layout::split_horizontally(area, &weights)
    }

    /// Pushes the current layout for `area` down to every surface.
    pub fn place(&mut self, area: Rect) {
        let columns = self.layout(area);
        for (slot, column) in self.slots.iter_mut().zip(columns) {
            slot.surface.set_bounds(column);
        }
    }

    /// Collapses every surface, used when the owning tab goes to the background.
    pub fn hide(&mut self) {
        for surface in self.surfaces_mut() {
            surface.set_bounds(Rect::collapsed());
        }
    }

    /// Drags the boundary right of surface `divider` by `delta` pixels.
    pub fn resize_divider(
        &mut self,
        divider: usize,
        delta: f64,
        total_width: f64,
        min_width: f64,
    ) -> ShellResult<()> {
        let dividers = self.slots.len().saturating_sub(1);
        ShellError::check_index(divider, dividers)?;

        let mut weights: Vec<f64> = self.slots.iter().map(|slot| slot.weight).collect();
        layout::move_divider(&mut weights, divider, delta, total_width, min_width);
        for (slot, weight) in self.slots.iter_mut().zip(weights) {
            slot.weight = weight;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::{RecordingSurface, SurfaceCall};

    fn pane_with(urls: &[&str]) -> SplitPane<RecordingSurface> {
        let mut pane = SplitPane::create(SurfaceId(0), RecordingSurface::default(), urls[0]);
        for (i, url) in urls.iter().enumerate().skip(1) {
            pane.add_surface(SurfaceId(i as u64), RecordingSurface::default(), url);
        }
        pane
    }

    #[test]
    fn test_create_seeds_one_navigated_surface() {
        let pane = pane_with(&["https://x"]);
        assert_eq!(pane.len(), 1);
        assert_eq!(
            pane.surfaces()[0].surface.calls,
            vec![SurfaceCall::Navigate("https://x".into())]
        );
    }

    #[test]
    fn test_add_surface_appends_in_order() {
        let mut pane = pane_with(&["https://a"]);
        let before = pane.len();
        let id = pane.add_surface(SurfaceId(7), RecordingSurface::default(), "https://b");

        assert_eq!(id, SurfaceId(7));
        assert_eq!(pane.len(), before + 1);
        assert_eq!(pane.ids().collect::<Vec<_>>(), vec![SurfaceId(0), SurfaceId(7)]);
        assert_eq!(pane.surface(SurfaceId(7)).unwrap().current_url().as_deref(), Some("https://b"));
        assert!(pane.contains(SurfaceId(0)));
        assert!(!pane.contains(SurfaceId(3)));
    }

    #[test]
    fn test_place_and_hide() {
        let mut pane = pane_with(&["https://a", "https://b"]);
        pane.place(Rect::new(0.0, 84.0, 800.0, 500.0));
        assert_eq!(pane.surfaces()[1].surface.bounds, Some(Rect::new(400.0, 84.0, 400.0, 500.0)));

        pane.hide();
        assert!(pane.surfaces().iter().all(|s| s.surface.bounds == Some(Rect::collapsed())));
    }

    #[test]
    fn test_resize_divider_out_of_range() {
        let mut pane = pane_with(&["https://a"]);
        assert!(matches!(
            pane.resize_divider(0, 10.0, 800.0, 100.0),
            Err(ShellError::InvalidIndex { index: 0, len: 0 })
        ));

        pane.add_surface(SurfaceId(1), RecordingSurface::default(), "https://b");
        pane.resize_divider(0, 100.0, 800.0, 100.0).unwrap();
        let cols = pane.layout(Rect::new(0.0, 0.0, 800.0, 100.0));
        assert_eq!(cols[0].width, 500.0);
        assert_eq!(cols[1].width, 300.0);
    }
}
