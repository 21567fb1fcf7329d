//! System tray icon using StatusNotifierItem (ksni)

use crossbeam_channel::Sender;
use ksni::{blocking::TrayMethods, menu::StandardItem, MenuItem, Tray};
use thiserror::Error;

use crate::app::config::GlobalShortcutConfig;

/// Actions that can be triggered from the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    ShowApp,
    CaptureFullScreen,
    CaptureArea,
    Quit,
}

#[derive(Debug, Error)]
pub enum TrayError {
    #[error("Failed to spawn tray icon: {0}")]
    Spawn(String),
}

pub struct CaptureTray {
    tx: Sender<TrayAction>,
    fullscreen_accel: String,
    area_accel: String,
}

impl CaptureTray {
    pub fn new(tx: Sender<TrayAction>, shortcuts: &GlobalShortcutConfig) -> Self {
        Self {
            tx,
            fullscreen_accel: shortcuts.fullscreen.clone(),
            area_accel: shortcuts.area.clone(),
        }
    }

    fn item(&self, label: String, action: TrayAction) -> MenuItem<Self> {
        let tx = self.tx.clone();
        MenuItem::Standard(StandardItem {
            label,
            activate: Box::new(move |_| {
                log::info!("Tray menu: {:?}", action);
                send(&tx, action);
            }),
            ..Default::default()
        })
    }
}

fn send(tx: &Sender<TrayAction>, action: TrayAction) {
    if let Err(e) = tx.send(action) {
        log::error!("Failed to send {:?}: {}", action, e);
    }
}

impl Tray for CaptureTray {
    fn id(&self) -> String {
        crate::APP_ID.to_string()
    }

    fn title(&self) -> String {
        crate::APP_NAME.to_string()
    }

    fn icon_name(&self) -> String {
        "camera-photo".to_string()
    }

    fn activate(&mut self, _x: i32, _y: i32) {
        send(&self.tx, TrayAction::ShowApp);
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        ksni::ToolTip {
            title: crate::APP_NAME.to_string(),
            description: "Click to show, right-click for capture options".to_string(),
            icon_name: String::new(),
            icon_pixmap: Vec::new(),
        }
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        vec![
            self.item("Show App".to_string(), TrayAction::ShowApp),
            MenuItem::Separator,
            self.item(
                format!("Capture Full Screen ({})", self.fullscreen_accel),
                TrayAction::CaptureFullScreen,
            ),
            self.item(
                format!("Capture Area ({})", self.area_accel),
                TrayAction::CaptureArea,
            ),
            MenuItem::Separator,
            self.item("Quit".to_string(), TrayAction::Quit),
        ]
    }
}

/// Handle type for the tray
pub type TrayHandle = ksni::blocking::Handle<CaptureTray>;

/// Create the tray icon and return a handle for controlling it
pub fn create_tray(
    tx: Sender<TrayAction>,
    shortcuts: &GlobalShortcutConfig,
) -> Result<TrayHandle, TrayError> {
    CaptureTray::new(tx, shortcuts)
        .spawn()
        .map_err(|e| TrayError::Spawn(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_show_captures_and_quit() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let tray = CaptureTray::new(tx, &GlobalShortcutConfig::default());
        let labels: Vec<String> = tray
            .menu()
            .into_iter()
            .filter_map(|item| match item {
                MenuItem::Standard(item) => Some(item.label),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            [
                "Show App",
                "Capture Full Screen (Ctrl+Shift+F)",
                "Capture Area (Ctrl+Shift+A)",
                "Quit"
            ]
        );
    }

    #[test]
    fn left_click_shows_app() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut tray = CaptureTray::new(tx, &GlobalShortcutConfig::default());
        tray.activate(0, 0);
        assert_eq!(rx.try_recv(), Ok(TrayAction::ShowApp));
    }
}
