use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    Wayland,
    X11,
    Unknown,
}

impl std::fmt::Display for DisplayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayServer::Wayland => write!(f, "Wayland"),
            DisplayServer::X11 => write!(f, "X11"),
            DisplayServer::Unknown => write!(f, "Unknown"),
        }
    }
}

impl DisplayServer {
    pub fn detect() -> Self {
        Self::from_vars(
            env::var("XDG_SESSION_TYPE").ok().as_deref(),
            env::var("WAYLAND_DISPLAY").is_ok(),
            env::var("DISPLAY").is_ok(),
        )
    }

    fn from_vars(session_type: Option<&str>, wayland_display: bool, x_display: bool) -> Self {
        if let Some(session_type) = session_type {
            match session_type.to_lowercase().as_str() {
                "wayland" => return DisplayServer::Wayland,
                "x11" => return DisplayServer::X11,
                _ => {}
            }
        }

        if wayland_display {
            return DisplayServer::Wayland;
        }

        if x_display {
            return DisplayServer::X11;
        }

        DisplayServer::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_type_wins_over_sockets() {
        assert_eq!(
            DisplayServer::from_vars(Some("X11"), true, true),
            DisplayServer::X11
        );
        assert_eq!(
            DisplayServer::from_vars(Some("wayland"), false, true),
            DisplayServer::Wayland
        );
    }

    #[test]
    fn falls_back_to_display_sockets() {
        assert_eq!(
            DisplayServer::from_vars(Some("tty"), true, true),
            DisplayServer::Wayland
        );
        assert_eq!(DisplayServer::from_vars(None, false, true), DisplayServer::X11);
        assert_eq!(
            DisplayServer::from_vars(None, false, false),
            DisplayServer::Unknown
        );
    }
}
