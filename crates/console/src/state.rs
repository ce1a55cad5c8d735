use uuid::Uuid;

use crate::cache::ResourceCache;
use crate::draft::MenuDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Menu,
    Add,
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(Tab::Menu),
            "add" => Ok(Tab::Add),
            other => Err(format!("unknown tab `{other}` (menu or add)")),
        }
    }
}

/// Everything that exists only while an admin is logged in.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub username: String,
    pub token: String,
    pub tab: Tab,
    /// Identity of the item the draft edits; `None` when adding.
    pub editing: Option<Uuid>,
    pub draft: MenuDraft,
    /// Item awaiting delete confirmation.
    pub pending_delete: Option<Uuid>,
    /// Outcome of the last submit/delete.
    pub message: Option<String>,
    /// Fetch problems, shown until the next successful fetch.
    pub notice: Option<String>,
    pub cache: ResourceCache,
}

impl Workspace {
    pub fn new(username: String, token: String) -> Self {
        Self {
            username,
            token,
            tab: Tab::Menu,
            editing: None,
            draft: MenuDraft::default(),
            pending_delete: None,
            message: None,
            notice: None,
            cache: ResourceCache::default(),
        }
    }

    pub fn reset_draft(&mut self) {
        self.editing = None;
        self.draft = MenuDraft::default();
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    LoggedOut { login_error: Option<String> },
    LoggedIn(Box<Workspace>),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::LoggedOut { login_error: None }
    }
}
