//! Raw stdin bytes to console input.

use crate::input::{Key, KeyEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Typed or pasted text; carriage returns included.
    Data(String),
    Key(KeyEvent),
    /// Ctrl+D.
    Eof,
}

const ESC: u8 = 0x1b;

/// Incremental decoder; escape sequences and UTF-8 characters split across
/// reads are held back until complete.
#[derive(Debug, Default)]
pub struct InputDecoder {
    pending: Vec<u8>,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one read. Printable runs are grouped into a single `Data`
    /// event so that a paste reaches the console as one chunk.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<InputEvent> {
        self.pending.extend_from_slice(bytes);
        let mut events = Vec::new();
        let mut text = String::new();
        let mut i = 0;

        while i < self.pending.len() {
            let step = match self.pending[i] {
                ESC => match parse_escape(&self.pending[i..]) {
                    Escape::Incomplete => break,
                    Escape::Key(key, len) => {
                        flush(&mut text, &mut events);
                        events.push(InputEvent::Key(KeyEvent::down(key)));
                        len
                    }
                },
                b'\r' | b'\n' => {
                    text.push('\r');
                    1
                }
                0x7f | 0x08 => {
                    flush(&mut text, &mut events);
                    events.push(InputEvent::Key(KeyEvent::down(Key::Backspace)));
                    1
                }
                0x03 => {
                    flush(&mut text, &mut events);
                    events.push(InputEvent::Key(KeyEvent::ctrl(Key::Char('c'))));
                    1
                }
                0x16 => {
                    flush(&mut text, &mut events);
                    events.push(InputEvent::Key(KeyEvent::ctrl(Key::Char('v'))));
                    1
                }
                0x04 => {
                    flush(&mut text, &mut events);
                    events.push(InputEvent::Eof);
                    1
                }
                b'\t' => {
                    text.push('\t');
                    1
                }
                b if b < 0x20 => 1,
                b => {
                    let width = utf8_width(b);
                    if i + width > self.pending.len() {
                        break;
                    }
                    match std::str::from_utf8(&self.pending[i..i + width]) {
                        Ok(s) => {
                            text.push_str(s);
                            width
                        }
                        Err(_) => 1,
                    }
                }
            };
            i += step;
        }

        self.pending.drain(..i);
        flush(&mut text, &mut events);
        events
    }
}

fn flush(text: &mut String, events: &mut Vec<InputEvent>) {
    if !text.is_empty() {
        events.push(InputEvent::Data(std::mem::take(text)));
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

enum Escape {
    Incomplete,
    Key(Key, usize),
}

fn parse_escape(bytes: &[u8]) -> Escape {
    match bytes.get(1) {
        // a lone escape at the end of a read is the Esc key itself
        None => Escape::Key(Key::Other, 1),
        Some(b'[') => parse_csi(bytes),
        Some(b'O') => match bytes.get(2) {
            None => Escape::Incomplete,
            Some(&b) => Escape::Key(ss3_key(b), 3),
        },
        Some(_) => Escape::Key(Key::Other, 1),
    }
}

fn parse_csi(bytes: &[u8]) -> Escape {
    let Some(end) = bytes[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return Escape::Incomplete;
    };
    let end = end + 2;
    let params = std::str::from_utf8(&bytes[2..end]).unwrap_or("");
    let first: u32 = params
        .split(';')
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(0);

    let key = match bytes[end] {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'~' => tilde_key(first),
        _ => Key::Other,
    };
    Escape::Key(key, end + 1)
}

fn ss3_key(b: u8) -> Key {
    match b {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'P'..=b'S' => Key::Function(b - b'P' + 1),
        _ => Key::Other,
    }
}

fn tilde_key(code: u32) -> Key {
    match code {
        1 | 7 => Key::Home,
        2 => Key::Insert,
        3 => Key::Delete,
        4 | 8 => Key::End,
        5 => Key::PageUp,
        6 => Key::PageDown,
        11..=15 => Key::Function((code - 10) as u8),
        17..=21 => Key::Function((code - 11) as u8),
        23 | 24 => Key::Function((code - 12) as u8),
        _ => Key::Other,
    }
}
