//! Theme Context
//!
//! The persisted color-scheme preference, resolved once at startup and
//! passed down to rendering collaborators. Fallback chain: stored
//! preference, then the host-reported system default, then light.

use crate::domain::{DomainResult, ThemeMode};
use crate::repository::{PreferenceRepository, SharedConnection};

const THEME_KEY: &str = "theme_mode";

pub struct ThemeContext {
    repo: PreferenceRepository,
    mode: ThemeMode,
}

impl ThemeContext {
    /// Resolve the effective mode from storage.
    ///
    /// `system_default` is whatever the host platform reports as its
    /// color scheme, if anything. A stored value that does not parse as
    /// a known mode falls through to the default chain.
    pub async fn load(
        conn: SharedConnection,
        system_default: Option<ThemeMode>,
    ) -> DomainResult<Self> {
        let repo = PreferenceRepository::new(conn);

        let mode = repo
            .load(THEME_KEY)
            .await?
            .as_deref()
            .and_then(ThemeMode::parse)
            .or(system_default)
            .unwrap_or_default();

        Ok(Self { repo, mode })
    }

    /// The currently effective mode
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Persist and switch to the given mode
    pub async fn set_mode(&mut self, mode: ThemeMode) -> DomainResult<()> {
        self.repo.save(THEME_KEY, mode.as_str()).await?;
        self.mode = mode;
        Ok(())
    }

    /// Flip between light and dark, persisting the choice
    pub async fn toggle(&mut self) -> DomainResult<ThemeMode> {
        let next = self.mode.toggled();
        self.set_mode(next).await?;
        Ok(next)
    }
}
