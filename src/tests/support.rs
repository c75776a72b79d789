//! Shared fixtures: sample records and an in-memory counting source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::codex::error::CodexError;
use crate::codex::models::{BasicCharacter, CharacterDetail, ColorScheme, PowerTier};
use crate::codex::source::CharacterSource;

pub fn basic(id: &str, name: &str, race: &str, role: &str) -> BasicCharacter {
    BasicCharacter {
        id: id.to_string(),
        name: name.to_string(),
        race: race.to_string(),
        role: role.to_string(),
        power: PowerTier::Unranked,
        portrait: String::new(),
        image: format!("assets/characters/{id}.webp"),
        color_scheme: ColorScheme::default(),
    }
}

pub fn sample_list() -> Vec<BasicCharacter> {
    vec![
        basic("rimuru", "Rimuru Tempest", "Slime", "Founder of Tempest"),
        basic("benimaru", "Benimaru", "Kijin", "Samurai General"),
        basic("milim", "Milim Nava", "Dragonoid", "Demon Lord"),
    ]
}

/// How [`CountingSource`] answers detail fetches.
#[derive(Debug, Clone, Copy)]
pub enum DetailMode {
    /// Serve a full detail record for IDs in the list, 404 otherwise.
    Serve,
    /// Fail every detail fetch.
    Fail,
    /// Like `Serve` but with a delay before resolving.
    Slow(Duration),
}

/// In-memory source that counts how often each fetch is exercised.
pub struct CountingSource {
    list: Vec<BasicCharacter>,
    fail_list: bool,
    detail_mode: DetailMode,
    pub list_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(list: Vec<BasicCharacter>) -> Self {
        Self {
            list,
            fail_list: false,
            detail_mode: DetailMode::Serve,
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_details(mut self) -> Self {
        self.detail_mode = DetailMode::Fail;
        self
    }

    pub fn slow_details(mut self, delay: Duration) -> Self {
        self.detail_mode = DetailMode::Slow(delay);
        self
    }

    pub fn list_fetches(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_fetches(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    fn serve_detail(&self, id: &str) -> Result<CharacterDetail, CodexError> {
        match self.list.iter().find(|c| c.id == id) {
            Some(character) => {
                let mut detail = CharacterDetail::from_basic(character.clone());
                detail.lore = Some(format!("Chronicle entry for {}.", character.name));
                Ok(detail)
            }
            None => Err(CodexError::Status {
                origin: "counting".to_string(),
                url: format!("mem://details/{id}.json"),
                status: 404,
            }),
        }
    }
}

#[async_trait]
impl CharacterSource for CountingSource {
    fn id(&self) -> &'static str {
        "counting"
    }

    async fn fetch_basic_list(&self) -> Result<Vec<BasicCharacter>, CodexError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(CodexError::Status {
                origin: "counting".to_string(),
                url: "mem://characters.json".to_string(),
                status: 503,
            });
        }
        Ok(self.list.clone())
    }

    async fn fetch_detail(&self, id: &str) -> Result<CharacterDetail, CodexError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        match self.detail_mode {
            DetailMode::Serve => self.serve_detail(id),
            DetailMode::Fail => Err(CodexError::Status {
                origin: "counting".to_string(),
                url: format!("mem://details/{id}.json"),
                status: 500,
            }),
            DetailMode::Slow(delay) => {
                tokio::time::sleep(delay).await;
                self.serve_detail(id)
            }
        }
    }
}
