//! Tab definitions, trait, and tab bar rendering.

pub mod characters;
pub mod chat;
pub mod crew;
pub mod game;
pub mod home;
pub mod profile;
pub mod worlds;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::prelude::*;

use crate::app::Sessions;

/// Identifies which tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    /// Conversation with the selected character.
    Chat,
    /// Character list and creation form.
    Characters,
    /// World list and creation form.
    Worlds,
    /// Story app welcome screen.
    Home,
    /// Crew roster and creation form.
    Crew,
    /// The branching story.
    Game,
    /// Progress summary.
    Profile,
}

impl TabId {
    /// All tab IDs in display order.
    pub const ALL: [TabId; 7] = [
        TabId::Chat,
        TabId::Characters,
        TabId::Worlds,
        TabId::Home,
        TabId::Crew,
        TabId::Game,
        TabId::Profile,
    ];

    /// Parse a tab name from a string.
    pub fn from_name(name: &str) -> Option<TabId> {
        match name.to_lowercase().as_str() {
            "chat" => Some(TabId::Chat),
            "characters" | "chars" => Some(TabId::Characters),
            "worlds" => Some(TabId::Worlds),
            "home" => Some(TabId::Home),
            "crew" => Some(TabId::Crew),
            "game" | "story" => Some(TabId::Game),
            "profile" => Some(TabId::Profile),
            _ => None,
        }
    }

    /// Tab bar label, including the number key.
    pub fn label(self) -> &'static str {
        match self {
            TabId::Chat => "[1]Chat",
            TabId::Characters => "[2]Characters",
            TabId::Worlds => "[3]Worlds",
            TabId::Home => "[4]Home",
            TabId::Crew => "[5]Crew",
            TabId::Game => "[6]Game",
            TabId::Profile => "[7]Profile",
        }
    }

    /// Tab for a number key (`'1'` is the first tab).
    pub fn from_digit(c: char) -> Option<TabId> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| TabId::ALL.get(i)).copied()
    }

    /// Index of this tab in the tab bar.
    pub fn index(self) -> usize {
        TabId::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Get the next tab (wrapping).
    pub fn next(self) -> TabId {
        let idx = (self.index() + 1) % TabId::ALL.len();
        TabId::ALL[idx]
    }

    /// Get the previous tab (wrapping).
    pub fn prev(self) -> TabId {
        let idx = if self.index() == 0 {
            TabId::ALL.len() - 1
        } else {
            self.index() - 1
        };
        TabId::ALL[idx]
    }
}

/// Whether a tab consumes keyboard input or uses vim-like navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Vim-like navigation: hjkl, Tab, number keys. Top-level handles tab switching.
    VimNav,
    /// Text input: the tab has its own input field. Most keys go to the tab.
    TextInput,
}

/// What the app should do after a tab handled a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing further.
    Handled,
    /// Quit the app.
    Quit,
    /// Switch to another tab.
    SwitchTo(TabId),
    /// Show or hide the help popup.
    ToggleHelp,
}

/// Trait that each tab screen implements.
///
/// Tabs keep only view state (cursors, forms, notices). The chat and story
/// data live in [`Sessions`], shared by all tabs.
pub trait Tab {
    /// Return the input mode for event routing.
    fn input_mode(&self) -> InputMode;

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent, sessions: &mut Sessions) -> KeyOutcome;

    /// Handle a mouse event.
    fn handle_mouse(&mut self, _mouse: MouseEvent) {}

    /// Draw the tab content into the given area.
    fn draw(&self, frame: &mut Frame, area: Rect, sessions: &Sessions);

    /// Return context-sensitive status bar text.
    fn status_hint(&self) -> &str;
}

/// Draw the tab bar.
pub fn draw_tab_bar(frame: &mut Frame, active: TabId, area: Rect) {
    let mut spans = Vec::new();

    for (i, tab) in TabId::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }

        let style = if *tab == active {
            Style::default().fg(Color::White).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(tab.label(), style));
    }

    let line = Line::from(spans);
    let paragraph = ratatui::widgets::Paragraph::new(line);
    frame.render_widget(paragraph, area);
}

/// Hit-test the tab bar for mouse clicks.
pub fn tab_bar_hit_test(col: u16) -> Option<TabId> {
    let divider_len = 3u16;
    let mut x = 0u16;
    for tab in TabId::ALL {
        let end_x = x + tab.label().len() as u16;
        if col >= x && col < end_x {
            return Some(tab);
        }
        x = end_x + divider_len;
    }
    None
}
