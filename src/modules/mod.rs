// Module exports for pure logic
pub mod layout;
pub mod navigation;
pub mod pane;             // Split pane: grow-only row of surfaces
pub mod router;           // Intent -> TabManager mapping
pub mod surface;          // Render surface contract
pub mod tabs;             // Tab strip and notification relay

#[cfg(test)]
pub(crate) mod testing;
