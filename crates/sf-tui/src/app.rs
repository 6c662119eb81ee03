//! Top-level application state managing tabs and the shared sessions.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;

use sf_chat::{ChatConfig, ChatSession};
use sf_story::{StoryConfig, StoryResult, StorySession};

use crate::tabs::characters::CharactersTab;
use crate::tabs::chat::ChatTab;
use crate::tabs::crew::CrewTab;
use crate::tabs::game::GameTab;
use crate::tabs::home::HomeTab;
use crate::tabs::profile::ProfileTab;
use crate::tabs::worlds::WorldsTab;
use crate::tabs::{self, InputMode, KeyOutcome, Tab, TabId};

/// Longest the event loop waits for input when no reply is pending.
pub const IDLE_TICK: Duration = Duration::from_millis(250);

/// Data shared by every tab.
pub struct Sessions {
    /// The character chat.
    pub chat: ChatSession,
    /// The story, saved on every change.
    pub story: StorySession,
}

impl Sessions {
    /// Start a chat session and open the story saved under the data directory.
    pub fn open(chat: ChatConfig, story: StoryConfig) -> StoryResult<Self> {
        Ok(Self {
            chat: ChatSession::new(chat),
            story: StorySession::open(story)?,
        })
    }
}

/// Main application state for the TUI.
pub struct TuiApp {
    /// Chat and story data.
    pub sessions: Sessions,
    /// Currently active tab.
    pub active_tab: TabId,
    /// Whether to show the global help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,

    chat: ChatTab,
    characters: CharactersTab,
    worlds: WorldsTab,
    home: HomeTab,
    crew: CrewTab,
    game: GameTab,
    profile: ProfileTab,
}

impl TuiApp {
    /// Create a new app over the given sessions.
    pub fn new(sessions: Sessions, start_tab: TabId) -> Self {
        Self {
            sessions,
            active_tab: start_tab,
            show_help: false,
            should_quit: false,
            chat: ChatTab::new(),
            characters: CharactersTab::new(),
            worlds: WorldsTab::new(),
            home: HomeTab::new(),
            crew: CrewTab::new(),
            game: GameTab::new(),
            profile: ProfileTab::new(),
        }
    }

    /// Get the input mode of the currently active tab.
    pub fn active_input_mode(&self) -> InputMode {
        self.active_tab_ref().input_mode()
    }

    /// Get a reference to the active tab.
    pub fn active_tab_ref(&self) -> &dyn Tab {
        match self.active_tab {
            TabId::Chat => &self.chat,
            TabId::Characters => &self.characters,
            TabId::Worlds => &self.worlds,
            TabId::Home => &self.home,
            TabId::Crew => &self.crew,
            TabId::Game => &self.game,
            TabId::Profile => &self.profile,
        }
    }

    /// Get the active tab and the sessions as separate borrows.
    fn active_tab_mut(&mut self) -> (&mut dyn Tab, &mut Sessions) {
        let tab: &mut dyn Tab = match self.active_tab {
            TabId::Chat => &mut self.chat,
            TabId::Characters => &mut self.characters,
            TabId::Worlds => &mut self.worlds,
            TabId::Home => &mut self.home,
            TabId::Crew => &mut self.crew,
            TabId::Game => &mut self.game,
            TabId::Profile => &mut self.profile,
        };
        (tab, &mut self.sessions)
    }

    /// Switch to a tab by ID.
    pub fn switch_tab(&mut self, tab: TabId) {
        tracing::debug!(?tab, "switch tab");
        self.active_tab = tab;
    }

    /// Route a terminal event. Key releases and resizes need no handling.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    /// Apply app-wide keys first, then give the key to the active tab.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let outcome = match self.global_key(key) {
            Some(outcome) => outcome,
            None => {
                let (tab, sessions) = self.active_tab_mut();
                tab.handle_key(key, sessions)
            }
        };
        self.apply(outcome);
    }

    /// Keys the app handles itself, whatever the active tab.
    ///
    /// Ctrl+C and Ctrl+1..7 work everywhere. While help is open any other
    /// key closes it. Plain `q`, `?`, Tab and 1..7 are only taken from
    /// navigation tabs, so text tabs can type them.
    fn global_key(&self, key: KeyEvent) -> Option<KeyOutcome> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Some(KeyOutcome::Quit),
            KeyCode::Char(c) if ctrl => {
                if let Some(tab) = TabId::from_digit(c) {
                    return Some(KeyOutcome::SwitchTo(tab));
                }
            }
            _ => {}
        }
        if self.show_help {
            return Some(KeyOutcome::ToggleHelp);
        }
        if self.active_input_mode() == InputMode::TextInput {
            return None;
        }
        match key.code {
            KeyCode::Char('q') => Some(KeyOutcome::Quit),
            KeyCode::Char('?') => Some(KeyOutcome::ToggleHelp),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(KeyOutcome::SwitchTo(self.active_tab.prev()))
            }
            KeyCode::Tab => Some(KeyOutcome::SwitchTo(self.active_tab.next())),
            KeyCode::BackTab => Some(KeyOutcome::SwitchTo(self.active_tab.prev())),
            KeyCode::Char(c) => TabId::from_digit(c).map(KeyOutcome::SwitchTo),
            _ => None,
        }
    }

    fn apply(&mut self, outcome: KeyOutcome) {
        match outcome {
            KeyOutcome::Handled => {}
            KeyOutcome::Quit => self.should_quit = true,
            KeyOutcome::SwitchTo(tab) => self.switch_tab(tab),
            KeyOutcome::ToggleHelp => self.show_help = !self.show_help,
        }
    }

    /// Clicks on the tab bar (row 0) switch tabs; everything else goes to
    /// the active tab.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let clicked_tab = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if mouse.row == 0 => {
                tabs::tab_bar_hit_test(mouse.column)
            }
            _ => None,
        };
        match clicked_tab {
            Some(tab) => self.switch_tab(tab),
            None => {
                let (tab, _) = self.active_tab_mut();
                tab.handle_mouse(mouse);
            }
        }
    }

    /// Draw the active tab.
    pub fn draw_active(&self, frame: &mut Frame, area: Rect) {
        self.active_tab_ref().draw(frame, area, &self.sessions);
    }

    /// Deliver chat replies that are due. Returns how many arrived.
    pub fn tick(&mut self, now: Instant) -> usize {
        let delivered = self.sessions.chat.poll(now).len();
        if delivered > 0 {
            tracing::debug!(delivered, "chat replies delivered");
        }
        delivered
    }

    /// How long to wait for input before the next tick.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.sessions.chat.next_due() {
            Some(due) => due.saturating_duration_since(now).min(IDLE_TICK),
            None => IDLE_TICK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::CharacterDraft;
    use sf_story::MemoryStore;

    fn app(tab: TabId) -> TuiApp {
        let chat = ChatSession::new(ChatConfig::default().with_seed(7));
        let story =
            StorySession::with_store(StoryConfig::default(), Box::new(MemoryStore::new())).unwrap();
        TuiApp::new(Sessions { chat, story }, tab)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn navigation_tabs_take_global_keys() {
        let mut app = app(TabId::Home);
        app.handle_key(key(KeyCode::Char('6')));
        assert_eq!(app.active_tab, TabId::Game);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.active_tab, TabId::Profile);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.active_tab, TabId::Game);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn text_tabs_type_global_keys() {
        let mut app = app(TabId::Chat);
        for c in "q?1".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.active_tab, TabId::Chat);
        assert!(!app.should_quit);
        assert!(!app.show_help);

        app.handle_key(ctrl('4'));
        assert_eq!(app.active_tab, TabId::Home);
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn any_key_closes_help() {
        let mut app = app(TabId::Game);
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.show_help);
        // The key that closed help did not reach the game.
        assert_eq!(app.sessions.story.state().current_scene().id, "start");
    }

    #[test]
    fn tab_bar_click_switches_tab() {
        let mut app = app(TabId::Home);
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(app.active_tab, TabId::Chat);
    }

    #[test]
    fn idle_timeout_without_pending_replies() {
        let app = app(TabId::Home);
        assert_eq!(app.poll_timeout(Instant::now()), IDLE_TICK);
    }

    #[test]
    fn chat_reply_arrives_after_delay() {
        let mut app = app(TabId::Chat);
        let state = app.sessions.chat.state_mut();
        let id = state
            .create_character(&mut CharacterDraft::new("Lyra", "A bard", "calm"))
            .map(|c| c.id)
            .unwrap();
        state.select_character(id);

        for c in "hi".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.sessions.chat.state().messages().len(), 1);

        let now = Instant::now();
        assert!(app.poll_timeout(now) <= IDLE_TICK);
        assert_eq!(app.tick(now + Duration::from_millis(1000)), 1);
        assert_eq!(app.sessions.chat.state().messages().len(), 2);
    }

    #[test]
    fn game_keys_advance_story() {
        let mut app = app(TabId::Game);
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.sessions.story.state().current_scene().id,
            "engineering"
        );
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.sessions.story.state().current_scene().id, "start");
    }

    #[test]
    fn selecting_character_switches_to_chat() {
        let mut app = app(TabId::Characters);
        app.sessions
            .chat
            .state_mut()
            .create_character(&mut CharacterDraft::new("Lyra", "A bard", ""));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.active_tab, TabId::Chat);
        assert_eq!(
            app.sessions.chat.state().selected().map(|c| c.name.as_str()),
            Some("Lyra")
        );
    }

    #[test]
    fn crew_form_adds_member() {
        let mut app = app(TabId::Crew);
        app.handle_key(key(KeyCode::Char('n')));
        for c in "Vega".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        for c in "Pilot".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.sessions.story.state().crew().len(), 1);
        assert_eq!(app.active_input_mode(), InputMode::VimNav);
    }
}
