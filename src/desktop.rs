// Tauri shell: child webviews as render surfaces, Tauri commands as the intent surface.
//
// The main window's own webview is the chrome (toolbar, address bar, tab strip).
// Content surfaces are child webviews laid out below it.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tauri::async_runtime::spawn;
use tauri::webview::{PageLoadEvent, WebviewBuilder};
use tauri::{
    AppHandle, Emitter, LogicalPosition, LogicalSize, Manager, State, Webview, WebviewUrl, Window,
    WindowEvent,
};
use tokio::sync::mpsc;
use url::Url;

use crate::error::{ShellError, ShellResult};
use crate::modules::layout::Rect;
use crate::modules::router::{CommandRouter, Intent, RouteOutcome};
use crate::modules::surface::{RenderSurface, SurfaceEvent, SurfaceFactory, SurfaceId};
use crate::modules::tabs::TabManager;
use crate::settings::Settings;
use crate::state::TabStripSnapshot;

const MIN_CONTENT_HEIGHT: f64 = 100.0;

pub struct ShellState {
    pub router: Mutex<CommandRouter<TauriSurfaceFactory>>,
}

#[derive(Default)]
struct PageState {
    title: Option<String>,
}

/// A child webview driven as a render surface.
pub struct TauriSurface {
    webview: Webview,
    page: Arc<Mutex<PageState>>,
}

impl TauriSurface {
    fn eval(&self, js: &str) {
        if let Err(e) = self.webview.eval(js) {
            log::warn!("[Shell] eval on {} failed: {}", self.webview.label(), e);
        }
    }
}

impl RenderSurface for TauriSurface {
    fn navigate(&mut self, url: &str) {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("[Shell] Not navigating to {:?}: {}", url, e);
                return;
            }
        };
        if let Err(e) = self.webview.navigate(parsed) {
            log::warn!("[Shell] navigate on {} failed: {}", self.webview.label(), e);
        }
    }

    fn back(&mut self) {
        self.eval("window.history.back()");
    }

    fn forward(&mut self) {
        self.eval("window.history.forward()");
    }

    fn reload(&mut self) {
        self.eval("window.location.reload()");
    }

    fn current_url(&self) -> Option<String> {
        self.webview.url().ok().map(|u| u.to_string())
    }

    fn current_title(&self) -> Option<String> {
        self.page.lock().ok().and_then(|page| page.title.clone())
    }

    fn set_bounds(&mut self, bounds: Rect) {
        let rect = tauri::Rect {
            position: tauri::Position::Logical(LogicalPosition::new(bounds.x, bounds.y)),
            size: tauri::Size::Logical(LogicalSize::new(bounds.width, bounds.height)),
        };
        if let Err(e) = self.webview.set_bounds(rect) {
            log::warn!("[Shell] set_bounds on {} failed: {}", self.webview.label(), e);
        }
    }
}

impl Drop for TauriSurface {
    fn drop(&mut self) {
        if let Err(e) = self.webview.close() {
            log::warn!("[Shell] Failed to close {}: {}", self.webview.label(), e);
        }
    }
}

/// The webview API reports no document title, so the host stands in for it.
fn title_for(url: &Url) -> String {
    url.host_str().map(str::to_string).unwrap_or_else(|| url.to_string())
}

/// Events one page-load callback reports, in delivery order.
fn page_load_events(load: PageLoadEvent, url: &Url) -> Vec<SurfaceEvent> {
    match load {
        PageLoadEvent::Started => vec![SurfaceEvent::UrlChanged(url.to_string())],
        // Redirects and in-page navigation can settle on a URL other than the one
        // reported at start.
        PageLoadEvent::Finished => vec![
            SurfaceEvent::UrlChanged(url.to_string()),
            SurfaceEvent::LoadFinished { ok: true },
        ],
    }
}

/// Forwards page-load callbacks to the main thread in the order they fired.
///
/// Callbacks may run while a command on the main thread holds the router lock, so
/// they only enqueue. One task on the async runtime drains the channel and posts each
/// event to the event loop; being off the main thread, every post is queued, never inlined.
#[derive(Clone)]
struct EventRelay {
    tx: mpsc::UnboundedSender<(SurfaceId, SurfaceEvent)>,
}

impl EventRelay {
    fn start(app: AppHandle) -> Self {
        Self::spawn_with(move |id, event| {
            let handle = app.clone();
            app.run_on_main_thread(move || apply_surface_event(&handle, id, event))
        })
    }

    /// Drains the channel into `post` until it fails.
    fn spawn_with<F>(post: F) -> Self
    where
        F: Fn(SurfaceId, SurfaceEvent) -> tauri::Result<()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<(SurfaceId, SurfaceEvent)>();
        spawn(async move {
            while let Some((id, event)) = rx.recv().await {
                if let Err(e) = post(id, event) {
                    log::error!("[Shell] Event loop gone, stopping relay: {}", e);
                    break;
                }
            }
        });
        Self { tx }
    }

    fn send(&self, id: SurfaceId, event: SurfaceEvent) {
        if let Err(e) = self.tx.send((id, event)) {
            let (_, event) = e.0;
            log::warn!("[Shell] Relay stopped, dropping {:?} from {}", event, id);
        }
    }
}

fn apply_surface_event(app: &AppHandle, id: SurfaceId, event: SurfaceEvent) {
    let state = app.state::<ShellState>();
    let (update, snapshot) = match state.router.lock() {
        Ok(mut router) => {
            let update = router.on_surface_event(id, event);
            (update, router.manager().snapshot())
        }
        Err(e) => {
            log::error!("[Shell] Router lock poisoned: {}", e);
            return;
        }
    };
    if let Some(update) = update {
        emit(app, "chrome-update", &update);
        emit(app, "update-tabs", &snapshot);
    }
}

fn emit<T: Serialize + Clone>(app: &AppHandle, event: &str, payload: &T) {
    if let Err(e) = app.emit(event, payload.clone()) {
        log::warn!("[Shell] Failed to emit {}: {}", event, e);
    }
}

pub struct TauriSurfaceFactory {
    window: Window,
    relay: EventRelay,
}

impl SurfaceFactory for TauriSurfaceFactory {
    type Surface = TauriSurface;

    fn create(&mut self, id: SurfaceId) -> ShellResult<TauriSurface> {
        let blank: Url = "about:blank"
            .parse()
            .map_err(|e: url::ParseError| ShellError::surface_creation(e.to_string()))?;
        let page = Arc::new(Mutex::new(PageState::default()));
        let hook_page = page.clone();
        let relay = self.relay.clone();

        let builder = WebviewBuilder::new(id.to_string(), WebviewUrl::External(blank)).on_page_load(
            move |_webview, payload| {
                if let PageLoadEvent::Finished = payload.event() {
                    if let Ok(mut page) = hook_page.lock() {
                        page.title = Some(title_for(payload.url()));
                    }
                }
                for event in page_load_events(payload.event(), payload.url()) {
                    relay.send(id, event);
                }
            },
        );

        // Created collapsed; the manager places it once it belongs to a pane.
        let webview = self
            .window
            .add_child(builder, LogicalPosition::new(0.0, 0.0), LogicalSize::new(0.0, 0.0))
            .map_err(|e| ShellError::surface_creation(e.to_string()))?;
        log::debug!("[Shell] Created {}", id);
        Ok(TauriSurface { webview, page })
    }
}

fn content_area(window: &Window, toolbar_height: f64) -> tauri::Result<Rect> {
    let scale = window.scale_factor()?;
    let size = window.inner_size()?.to_logical::<f64>(scale);
    let height = (size.height - toolbar_height).max(MIN_CONTENT_HEIGHT);
    Ok(Rect::new(0.0, toolbar_height, size.width, height))
}

fn locked<'a>(
    state: &'a State<'_, ShellState>,
) -> Result<std::sync::MutexGuard<'a, CommandRouter<TauriSurfaceFactory>>, String> {
    state.router.lock().map_err(|e| e.to_string())
}

#[tauri::command]
fn dispatch_intent(
    app: AppHandle,
    state: State<ShellState>,
    intent: Intent,
) -> Result<TabStripSnapshot, String> {
    let (outcome, snapshot) = {
        let mut router = locked(&state)?;
        let outcome = router.dispatch(intent).map_err(|e| e.to_string())?;
        (outcome, router.manager().snapshot())
    };

    emit(&app, "update-tabs", &snapshot);
    if outcome == RouteOutcome::Exit {
        log::info!("[Shell] Last tab closed, exiting");
        app.exit(0);
    }
    Ok(snapshot)
}

#[tauri::command]
fn set_address_bar_text(state: State<ShellState>, text: String) -> Result<(), String> {
    locked(&state)?.manager_mut().set_address_bar_text(text);
    Ok(())
}

#[tauri::command]
fn set_tab_label(
    app: AppHandle,
    state: State<ShellState>,
    index: usize,
    label: String,
) -> Result<(), String> {
    let snapshot = {
        let mut router = locked(&state)?;
        router.manager_mut().set_tab_label(index, label).map_err(|e| e.to_string())?;
        router.manager().snapshot()
    };
    emit(&app, "update-tabs", &snapshot);
    Ok(())
}

#[tauri::command]
fn resize_divider(state: State<ShellState>, divider: usize, delta: f64) -> Result<(), String> {
    locked(&state)?
        .manager_mut()
        .resize_divider(divider, delta)
        .map_err(|e| e.to_string())
}

#[tauri::command]
fn tab_strip(state: State<ShellState>) -> Result<TabStripSnapshot, String> {
    Ok(locked(&state)?.manager().snapshot())
}

fn open_shell(app: &tauri::App) -> Result<(), Box<dyn std::error::Error>> {
    let handle = app.handle().clone();

    let settings_path = handle.path().app_data_dir()?.join("settings.json");
    let settings = Settings::load_from(&settings_path);
    if !settings_path.exists() {
        // Leave an editable copy of the defaults behind.
        if let Err(e) = settings.save_to(&settings_path) {
            log::warn!("[Settings] Could not write defaults to {:?}: {}", settings_path, e);
        }
    }
    let toolbar_height = settings.toolbar_height;

    let window = app.get_window("main").ok_or("main window missing")?;
    let factory = TauriSurfaceFactory {
        window: window.clone(),
        relay: EventRelay::start(handle.clone()),
    };

    let mut manager = TabManager::new(factory, settings);
    manager.set_content_area(content_area(&window, toolbar_height)?);
    let start_url = manager.settings().new_tab_url().to_string();
    manager.create_tab(&start_url)?;
    app.manage(ShellState {
        router: Mutex::new(CommandRouter::new(manager)),
    });

    let resized = window.clone();
    window.on_window_event(move |event| {
        if let WindowEvent::Resized(_) = event {
            let area = match content_area(&resized, toolbar_height) {
                Ok(area) => area,
                Err(e) => {
                    log::warn!("[Shell] Could not measure window: {}", e);
                    return;
                }
            };
            let state = handle.state::<ShellState>();
            let mut router = match state.router.lock() {
                Ok(router) => router,
                Err(e) => {
                    log::error!("[Shell] Router lock poisoned: {}", e);
                    return;
                }
            };
            router.manager_mut().set_content_area(area);
        }
    });

    log::info!("[Shell] Started with {}", start_url);
    Ok(())
}

pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            open_shell(app)
        })
        .invoke_handler(tauri::generate_handler![
            dispatch_intent,
            set_address_bar_text,
            set_tab_label,
            resize_divider,
            tab_strip
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tauri::async_runtime::block_on;

    #[test]
    fn test_finished_load_reports_settled_url_before_finishing() {
        let url: Url = "https://example.com/landing".parse().unwrap();
        assert_eq!(
            page_load_events(PageLoadEvent::Started, &url),
            vec![SurfaceEvent::UrlChanged("https://example.com/landing".into())]
        );
        assert_eq!(
            page_load_events(PageLoadEvent::Finished, &url),
            vec![
                SurfaceEvent::UrlChanged("https://example.com/landing".into()),
                SurfaceEvent::LoadFinished { ok: true },
            ]
        );
    }

    #[test]
    fn test_title_is_page_host() {
        let url: Url = "https://news.example.org/a/b".parse().unwrap();
        assert_eq!(title_for(&url), "news.example.org");
    }

    #[test]
    fn test_relay_posts_in_send_order() {
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
        let relay = EventRelay::spawn_with(move |id, event| {
            seen_tx.send((id, event)).unwrap();
            Ok(())
        });

        let sent = vec![
            (SurfaceId(0), SurfaceEvent::UrlChanged("https://a".into())),
            (SurfaceId(1), SurfaceEvent::UrlChanged("https://b".into())),
            (SurfaceId(0), SurfaceEvent::TitleChanged("A".into())),
            (SurfaceId(1), SurfaceEvent::LoadFinished { ok: true }),
        ];
        for (id, event) in sent.clone() {
            relay.send(id, event);
        }

        let seen = block_on(async {
            let mut seen = Vec::new();
            while seen.len() < sent.len() {
                seen.push(seen_rx.recv().await.unwrap());
            }
            seen
        });
        assert_eq!(seen, sent);
    }

    #[test]
    fn test_relay_stops_when_event_loop_is_gone() {
        let relay = EventRelay::spawn_with(|_, _| {
            Err(tauri::Error::Io(std::io::Error::other("event loop closed")))
        });
        relay.send(SurfaceId(1), SurfaceEvent::LoadFinished { ok: true });
        block_on(relay.tx.closed());

        // Logged and dropped, not a panic.
        relay.send(SurfaceId(1), SurfaceEvent::LoadFinished { ok: true });
        assert!(relay.tx.is_closed());
    }
}
