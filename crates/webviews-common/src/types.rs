use serde::{Deserialize, Serialize};
use std::fmt;

/// How a requested width and height apply to the native window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindowSizeHint {
    /// Width and height are the default size.
    #[default]
    None,
    /// Width and height are minimum bounds.
    Min,
    /// Width and height are maximum bounds.
    Max,
    /// Window size can not be changed by the user.
    Fixed,
}

impl WindowSizeHint {
    /// Map the native `WEBVIEW_HINT_*` constant to a hint.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            1 => Some(Self::Min),
            2 => Some(Self::Max),
            3 => Some(Self::Fixed),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Min => 1,
            Self::Max => 2,
            Self::Fixed => 3,
        }
    }

    /// Whether the user may still resize the window under this hint.
    pub fn is_resizable(self) -> bool {
        self != Self::Fixed
    }
}

impl fmt::Display for WindowSizeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Min => "min",
            Self::Max => "max",
            Self::Fixed => "fixed",
        };
        f.write_str(name)
    }
}
