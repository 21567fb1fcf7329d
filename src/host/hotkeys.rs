//! Global keyboard shortcuts
//!
//! Registered with the OS through `global-hotkey`; pressed events are
//! drained from its channel by a timer on the main loop.

use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use log::{debug, info, warn};
use thiserror::Error;

use super::desktop::DisplayServer;
use crate::app::config::GlobalShortcutConfig;
use crate::bridge::HostEvent;

#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("Invalid shortcut '{accelerator}': {reason}")]
    Parse { accelerator: String, reason: String },

    #[error("Global shortcuts unavailable: {0}")]
    Manager(String),

    #[error("Failed to register '{accelerator}': {reason}")]
    Register { accelerator: String, reason: String },

    #[error("No global shortcut could be registered")]
    NothingRegistered,
}

pub fn parse_accelerator(accelerator: &str) -> Result<HotKey, HotkeyError> {
    accelerator
        .parse::<HotKey>()
        .map_err(|e| HotkeyError::Parse {
            accelerator: accelerator.to_string(),
            reason: e.to_string(),
        })
}

/// Register every configured shortcut through `register`.
///
/// A shortcut that fails to parse or register is logged and skipped, so one
/// conflict never costs the other bindings.
fn bind_all<F>(config: &GlobalShortcutConfig, mut register: F) -> Vec<(HotKey, HostEvent)>
where
    F: FnMut(HotKey) -> Result<(), String>,
{
    let mut bindings = Vec::new();
    for (accelerator, event) in [
        (&config.fullscreen, HostEvent::TriggerFullscreenCapture),
        (&config.area, HostEvent::TriggerAreaCapture),
    ] {
        let registered = parse_accelerator(accelerator).and_then(|hotkey| {
            register(hotkey)
                .map(|()| hotkey)
                .map_err(|reason| HotkeyError::Register {
                    accelerator: accelerator.clone(),
                    reason,
                })
        });
        match registered {
            Ok(hotkey) => {
                info!("Registered global shortcut {} for {:?}", accelerator, event);
                bindings.push((hotkey, event));
            }
            Err(e) => warn!("{}", e),
        }
    }
    bindings
}

pub struct GlobalShortcuts {
    manager: GlobalHotKeyManager,
    bindings: Vec<(HotKey, HostEvent)>,
}

impl GlobalShortcuts {
    pub fn register(config: &GlobalShortcutConfig) -> Result<Self, HotkeyError> {
        let display = DisplayServer::detect();
        debug!("Display server: {}", display);
        if display == DisplayServer::Wayland {
            warn!("{} session: global shortcuts only fire while an X11 window has focus", display);
        }

        let manager = GlobalHotKeyManager::new().map_err(|e| HotkeyError::Manager(e.to_string()))?;
        let bindings = bind_all(config, |hotkey| {
            manager.register(hotkey).map_err(|e| e.to_string())
        });
        if bindings.is_empty() {
            return Err(HotkeyError::NothingRegistered);
        }

        Ok(Self { manager, bindings })
    }

    pub fn event_for(&self, id: u32) -> Option<HostEvent> {
        self.bindings
            .iter()
            .find(|(hotkey, _)| hotkey.id() == id)
            .map(|(_, event)| *event)
    }

    /// Events for every shortcut pressed since the last poll.
    pub fn poll(&self) -> Vec<HostEvent> {
        let mut events = Vec::new();
        while let Ok(event) = GlobalHotKeyEvent::receiver().try_recv() {
            if event.state() != HotKeyState::Pressed {
                continue;
            }
            match self.event_for(event.id()) {
                Some(host_event) => events.push(host_event),
                None => debug!("Ignoring unknown hotkey id {}", event.id()),
            }
        }
        events
    }

    pub fn unregister_all(&mut self) {
        for (hotkey, _) in self.bindings.drain(..) {
            if let Err(e) = self.manager.unregister(hotkey) {
                warn!("Failed to unregister global shortcut: {}", e);
            }
        }
    }
}

impl Drop for GlobalShortcuts {
    fn drop(&mut self) {
        self.unregister_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use global_hotkey::hotkey::{Code, Modifiers};

    #[test]
    fn default_accelerators_parse() {
        let config = GlobalShortcutConfig::default();
        assert_eq!(
            parse_accelerator(&config.fullscreen).unwrap(),
            HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyF)
        );
        assert_eq!(
            parse_accelerator(&config.area).unwrap(),
            HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyA)
        );
    }

    #[test]
    fn malformed_accelerator_is_reported() {
        let err = parse_accelerator("Ctrl+Shift+").unwrap_err();
        assert!(matches!(err, HotkeyError::Parse { .. }));
        assert!(err.to_string().contains("Ctrl+Shift+"));
    }

    #[test]
    fn conflicting_shortcut_keeps_the_other_binding() {
        let config = GlobalShortcutConfig::default();
        let taken = parse_accelerator(&config.area).unwrap();
        let mut attempts = 0;

        let bindings = bind_all(&config, |hotkey| {
            attempts += 1;
            if hotkey == taken {
                Err("already grabbed".to_string())
            } else {
                Ok(())
            }
        });

        assert_eq!(attempts, 2);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].1, HostEvent::TriggerFullscreenCapture);
    }

    #[test]
    fn malformed_shortcut_does_not_block_the_other() {
        let config = GlobalShortcutConfig {
            fullscreen: "Ctrl+Shift+".to_string(),
            ..GlobalShortcutConfig::default()
        };
        let bindings = bind_all(&config, |_| Ok(()));
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].1, HostEvent::TriggerAreaCapture);
    }
}
