use gtk::gdk;
use gtk4 as gtk;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CaptureFullScreen,
    CaptureArea,
    Save,
    Copy,
    Clear,
    Cancel,
}

impl Action {
    pub fn label(&self) -> &str {
        match self {
            Action::CaptureFullScreen => "Capture Full Screen",
            Action::CaptureArea => "Capture Area",
            Action::Save => "Save to File",
            Action::Copy => "Copy to Clipboard",
            Action::Clear => "Clear Screenshot",
            Action::Cancel => "Cancel Selection / Hide to Tray",
        }
    }

    pub fn all() -> &'static [Action] {
        &[
            Action::CaptureFullScreen,
            Action::CaptureArea,
            Action::Save,
            Action::Copy,
            Action::Clear,
            Action::Cancel,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: gdk::Key,
    pub modifiers: gdk::ModifierType,
}

/// Keyboard shortcuts active while one of our windows has focus.
#[derive(Debug, Clone)]
pub struct ShortcutConfig {
    bindings: HashMap<Action, Shortcut>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Capture
        bindings.insert(
            Action::CaptureFullScreen,
            Shortcut {
                key: gdk::Key::f,
                modifiers: gdk::ModifierType::CONTROL_MASK | gdk::ModifierType::SHIFT_MASK,
            },
        );
        bindings.insert(
            Action::CaptureArea,
            Shortcut {
                key: gdk::Key::a,
                modifiers: gdk::ModifierType::CONTROL_MASK | gdk::ModifierType::SHIFT_MASK,
            },
        );

        // Result actions
        bindings.insert(
            Action::Save,
            Shortcut {
                key: gdk::Key::s,
                modifiers: gdk::ModifierType::CONTROL_MASK,
            },
        );
        bindings.insert(
            Action::Copy,
            Shortcut {
                key: gdk::Key::c,
                modifiers: gdk::ModifierType::CONTROL_MASK,
            },
        );
        bindings.insert(
            Action::Clear,
            Shortcut {
                key: gdk::Key::Delete,
                modifiers: gdk::ModifierType::empty(),
            },
        );
        bindings.insert(
            Action::Cancel,
            Shortcut {
                key: gdk::Key::Escape,
                modifiers: gdk::ModifierType::empty(),
            },
        );

        Self { bindings }
    }
}

impl ShortcutConfig {
    pub fn get_action(&self, key: gdk::Key, modifiers: gdk::ModifierType) -> Option<Action> {
        // Filter out irrelevant modifiers like NumLock/CapsLock/ScrollLock
        let mask = gdk::ModifierType::CONTROL_MASK
            | gdk::ModifierType::SHIFT_MASK
            | gdk::ModifierType::ALT_MASK
            | gdk::ModifierType::SUPER_MASK
            | gdk::ModifierType::META_MASK;

        let clean_mods = modifiers & mask;
        // Shifted letters arrive as upper case keyvals
        let key = key.to_lower();

        for (action, shortcut) in &self.bindings {
            if shortcut.key == key && shortcut.modifiers == clean_mods {
                return Some(*action);
            }

            // BackSpace clears too
            if *action == Action::Clear
                && key == gdk::Key::BackSpace
                && shortcut.key == gdk::Key::Delete
                && shortcut.modifiers == clean_mods
            {
                return Some(*action);
            }
        }
        None
    }

    pub fn get_shortcut_label(&self, action: Action) -> String {
        if let Some(sc) = self.bindings.get(&action) {
            return gtk::accelerator_get_label(sc.key, sc.modifiers).to_string();
        }
        String::new()
    }
}

/// System-wide shortcuts, in the accelerator syntax of `global-hotkey`.
#[derive(Debug, Clone)]
pub struct GlobalShortcutConfig {
    pub fullscreen: String,
    pub area: String,
}

impl Default for GlobalShortcutConfig {
    fn default() -> Self {
        Self {
            fullscreen: "Ctrl+Shift+F".to_string(),
            area: "Ctrl+Shift+A".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Waited by the host after hiding its window.
    pub host_settle: Duration,
    /// Waited before opening the stream of a new capture.
    pub capture_settle: Duration,
    /// Waited before grabbing the frame for a finished selection.
    pub reselect_settle: Duration,
    /// Smallest accepted selection side, in overlay pixels.
    pub min_selection: f64,
    pub toast_timeout_secs: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            host_settle: Duration::from_millis(200),
            capture_settle: Duration::from_millis(300),
            reselect_settle: Duration::from_millis(200),
            min_selection: 10.0,
            toast_timeout_secs: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub shortcuts: ShortcutConfig,
    pub global_shortcuts: GlobalShortcutConfig,
    pub capture: CaptureConfig,
}
