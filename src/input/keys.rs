/// Renderer-neutral key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
    Delete,
    Insert,
    Function(u8),
    Char(char),
    Other,
}

impl Key {
    /// Maps a DOM `keyCode` plus `key` string.
    pub fn from_dom(key_code: u32, key: &str) -> Self {
        match key_code {
            8 => Key::Backspace,
            33 => Key::PageUp,
            34 => Key::PageDown,
            35 => Key::End,
            36 => Key::Home,
            37 => Key::Left,
            38 => Key::Up,
            39 => Key::Right,
            40 => Key::Down,
            45 => Key::Insert,
            46 => Key::Delete,
            112..=123 => Key::Function((key_code - 111) as u8),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Press,
    Up,
}

impl KeyPhase {
    pub fn from_dom(event_type: &str) -> Self {
        match event_type {
            "keydown" => KeyPhase::Down,
            "keyup" => KeyPhase::Up,
            _ => KeyPhase::Press,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub phase: KeyPhase,
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self {
            key,
            phase: KeyPhase::Down,
            ctrl: false,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            phase: KeyPhase::Up,
            ctrl: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            phase: KeyPhase::Down,
            ctrl: true,
        }
    }

    pub fn is_down(&self) -> bool {
        self.phase == KeyPhase::Down
    }
}
