use inksac::prelude::*;

use crate::config::ColorMode;

/// Severity of an interpreter message, as reported by the module's
/// message callback (`0..=4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    Trace,
    Info,
    Warning,
    Alarm,
    Fail,
}

impl Gravity {
    pub fn from_level(level: i32) -> Option<Self> {
        match level {
            0 => Some(Gravity::Trace),
            1 => Some(Gravity::Info),
            2 => Some(Gravity::Warning),
            3 => Some(Gravity::Alarm),
            4 => Some(Gravity::Fail),
            _ => None,
        }
    }
}

/// ANSI styling for console chrome and interpreter messages.
#[derive(Debug, Clone, Copy)]
pub struct MessageStyler {
    enabled: bool,
}

impl Default for MessageStyler {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl MessageStyler {
    pub fn new(mode: ColorMode) -> Self {
        let enabled = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => !matches!(
                check_color_support().unwrap_or(ColorSupport::NoColor),
                ColorSupport::NoColor
            ),
        };
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn prompt(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Green).bold().build())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Red).bold().build())
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Yellow).bold().build())
    }

    pub fn info(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Green).bold().build())
    }

    pub fn trace(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Yellow).build())
    }

    pub fn gravity(&self, gravity: Gravity, text: &str) -> String {
        match gravity {
            Gravity::Trace => self.trace(text),
            Gravity::Info => self.info(text),
            Gravity::Warning => self.warning(text),
            Gravity::Alarm | Gravity::Fail => self.error(text),
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if !self.enabled {
            return text.to_string();
        }
        text.style(style).to_string()
    }
}
