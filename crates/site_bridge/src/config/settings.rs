//! Modal test session settings

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Extent;
use crate::platform::PresenterFlags;

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter passed to `env_logger` (overridden by `RUST_LOG`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Host (parent) window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParentWindowConfig {
    /// Title bar text
    pub title: String,
    /// Outer window width in pixels
    pub width: u32,
    /// Outer window height in pixels
    pub height: u32,
    /// Width of the content island connected to the window
    pub content_width: u32,
    /// Height of the content island connected to the window
    pub content_height: u32,
}

impl ParentWindowConfig {
    /// Outer window size
    pub fn size(&self) -> Extent {
        extent(self.width, self.height)
    }

    /// Size of the parent's content island
    pub fn content_size(&self) -> Extent {
        extent(self.content_width, self.content_height)
    }
}

impl Default for ParentWindowConfig {
    fn default() -> Self {
        Self {
            title: "Modal IsModal Test - Parent Window".to_string(),
            width: 600,
            height: 400,
            content_width: 800,
            content_height: 600,
        }
    }
}

/// Modal popup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalWindowConfig {
    /// Title bar text
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Draw a border around the popup
    pub bordered: bool,
    /// Draw a title bar (and with it the close button)
    pub titled: bool,
}

impl ModalWindowConfig {
    /// Client area size
    pub fn size(&self) -> Extent {
        extent(self.width, self.height)
    }

    /// Presenter flags for the popup window; always modal
    pub fn presenter_flags(&self) -> PresenterFlags {
        let mut flags = PresenterFlags::MODAL;
        flags.set(PresenterFlags::BORDER, self.bordered);
        flags.set(PresenterFlags::TITLE_BAR, self.titled);
        flags
    }
}

impl Default for ModalWindowConfig {
    fn default() -> Self {
        Self {
            title: "Modal Test Window - Hello from Modal!".to_string(),
            width: 400,
            height: 300,
            bordered: true,
            titled: true,
        }
    }
}

/// One user interaction in a scripted session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    /// Press the "Show Modal" button
    ShowModal,
    /// Press the "Close Modal" button
    CloseModal,
    /// Press the close button on the modal's title bar
    CloseModalWindow,
    /// Click inside the parent window's client area
    ClickParent {
        /// Client X coordinate
        x: i32,
        /// Client Y coordinate
        y: i32,
    },
    /// Show then close the modal `iterations` times on consecutive ticks
    RapidCycle {
        /// Number of show/close pairs
        iterations: u32,
    },
    /// Press the close button on the parent window
    CloseParentWindow,
}

/// A scripted interaction delivered at a dispatch tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Dispatch tick at which the action fires
    pub at: u64,
    /// What the simulated user does
    pub action: ScriptAction,
}

impl ScriptStep {
    /// Create a step
    pub const fn new(at: u64, action: ScriptAction) -> Self {
        Self { at, action }
    }

    /// The built-in interaction session
    ///
    /// Open the modal, poke the blocked parent, close through the title bar,
    /// confirm the parent answers, stress repeated cycles, then quit with a
    /// modal still open so shutdown has to tear it down.
    pub fn default_session() -> Vec<Self> {
        vec![
            Self::new(1, ScriptAction::ShowModal),
            Self::new(2, ScriptAction::ShowModal),
            Self::new(3, ScriptAction::ClickParent { x: 40, y: 80 }),
            Self::new(4, ScriptAction::CloseModalWindow),
            Self::new(5, ScriptAction::ClickParent { x: 40, y: 80 }),
            Self::new(6, ScriptAction::CloseModal),
            Self::new(8, ScriptAction::RapidCycle { iterations: 10 }),
            Self::new(40, ScriptAction::ShowModal),
            Self::new(41, ScriptAction::CloseParentWindow),
        ]
    }
}

/// Complete configuration for a modal test session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalTestConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Parent window settings
    pub parent: ParentWindowConfig,
    /// Modal popup settings
    pub modal: ModalWindowConfig,
    /// Scripted session; empty means [`ScriptStep::default_session`]
    pub script: Vec<ScriptStep>,
}

impl ModalTestConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parent.title.is_empty() {
            return Err(ConfigError::Invalid("parent.title cannot be empty".to_string()));
        }
        if self.modal.title.is_empty() {
            return Err(ConfigError::Invalid("modal.title cannot be empty".to_string()));
        }
        if self.parent.width == 0 || self.parent.height == 0 {
            return Err(ConfigError::Invalid("parent window size must be non-zero".to_string()));
        }
        if self.parent.content_width == 0 || self.parent.content_height == 0 {
            return Err(ConfigError::Invalid("parent content size must be non-zero".to_string()));
        }
        if self.modal.width == 0 || self.modal.height == 0 {
            return Err(ConfigError::Invalid("modal size must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Script to run, falling back to the built-in session
    pub fn effective_script(&self) -> Vec<ScriptStep> {
        if self.script.is_empty() {
            ScriptStep::default_session()
        } else {
            self.script.clone()
        }
    }
}

impl Config for ModalTestConfig {}

fn extent(width: u32, height: u32) -> Extent {
    Extent::new(
        i32::try_from(width).unwrap_or(i32::MAX),
        i32::try_from(height).unwrap_or(i32::MAX),
    )
}
