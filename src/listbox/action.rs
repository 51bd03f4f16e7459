use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Keys the listbox understands. Everything else arrives as `Other` and is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
    Backspace,
    Clear,
    Tab,
    Shift,
    Char(char),
    Other,
}

impl Key {
    /// Build a key from a typed character. A literal space becomes `Key::Space`.
    pub fn from_char(ch: char) -> Self {
        if ch == ' ' { Key::Space } else { Key::Char(ch) }
    }

    /// Keys that open a closed menu.
    pub fn opens_menu(self) -> bool {
        matches!(
            self,
            Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Space | Key::Home | Key::End
        )
    }

    /// The printable character carried by this key, if any. Space is not printable here.
    pub fn printable(self) -> Option<char> {
        match self {
            Key::Char(ch) if ch != ' ' && !ch.is_control() => Some(ch),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        ctrl: false,
        meta: false,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };

    /// Alt, Ctrl or Meta held. Shift does not count: it only changes the typed character.
    pub fn has_command(self) -> bool {
        self.alt || self.ctrl || self.meta
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(m: KeyModifiers) -> Self {
        Self {
            alt: m.contains(KeyModifiers::ALT),
            ctrl: m.contains(KeyModifiers::CONTROL),
            meta: m.intersects(KeyModifiers::META | KeyModifiers::SUPER),
            shift: m.contains(KeyModifiers::SHIFT),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

impl From<&KeyEvent> for KeyInput {
    fn from(event: &KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Down => Key::ArrowDown,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            KeyCode::Enter => Key::Enter,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            // Numpad 5 without NumLock is the "Clear" key.
            KeyCode::KeypadBegin => Key::Clear,
            KeyCode::Tab | KeyCode::BackTab => Key::Tab,
            KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
                Key::Shift
            }
            KeyCode::Char(ch) => Key::from_char(ch),
            _ => Key::Other,
        };
        let mut modifiers = Modifiers::from(event.modifiers);
        modifiers.shift |= key == Key::Shift;
        Self { key, modifiers }
    }
}

/// Semantic action produced from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Close,
    Confirm,
    First,
    Last,
    Next,
    Open,
    PageDown,
    PageUp,
    Previous,
    Select,
    Type,
}

impl MenuAction {
    /// Actions that move the active index.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            MenuAction::First | MenuAction::Last | MenuAction::Next | MenuAction::Previous
        )
    }
}

/// Classify a key press. The first matching rule wins: open keys on a closed
/// menu, then typing (open or closed), then the open-menu bindings.
pub fn classify(input: KeyInput, menu_open: bool) -> Option<MenuAction> {
    let KeyInput { key, modifiers } = input;

    if !menu_open && key.opens_menu() {
        return Some(MenuAction::Open);
    }

    let typed = key.printable().is_some() && !modifiers.has_command();
    if matches!(key, Key::Backspace | Key::Clear) || typed {
        return Some(MenuAction::Type);
    }

    if !menu_open {
        return None;
    }

    match key {
        Key::ArrowDown if !modifiers.alt => Some(MenuAction::Next),
        Key::ArrowUp if modifiers.alt => Some(MenuAction::Close),
        Key::ArrowUp => Some(MenuAction::Previous),
        Key::Home => Some(MenuAction::First),
        Key::End => Some(MenuAction::Last),
        Key::PageUp => Some(MenuAction::PageUp),
        Key::PageDown => Some(MenuAction::PageDown),
        Key::Escape => Some(MenuAction::Close),
        Key::Enter => Some(MenuAction::Confirm),
        Key::Space => Some(MenuAction::Select),
        _ => None,
    }
}
