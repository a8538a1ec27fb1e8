//! Caller-populated font registry shared by every surface of a render.
//!
//! Families become "ready" when their bytes are registered. Loaders running on other threads
//! register into a cloned handle while the pipeline waits, with a bound, in
//! [`FontRegistry::wait_ready`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use anyhow::Context;

use crate::foundation::error::{CalwallError, CalwallResult};

#[derive(Default)]
struct RegistryState {
    faces: BTreeMap<String, Arc<Vec<u8>>>,
    fallback: Option<String>,
}

#[derive(Default)]
struct Shared {
    state: Mutex<RegistryState>,
    changed: Condvar,
}

/// Family name to font bytes. Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct FontRegistry {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let families = self.families().unwrap_or_default();
        f.debug_struct("FontRegistry")
            .field("families", &families)
            .finish()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CalwallResult<MutexGuard<'_, RegistryState>> {
        self.shared
            .state
            .lock()
            .map_err(|_| CalwallError::render("font registry lock poisoned"))
    }

    /// Register `bytes` under `family` and wake every waiter.
    ///
    /// The first registered family becomes the fallback unless one was set explicitly.
    pub fn register(&self, family: impl Into<String>, bytes: Vec<u8>) -> CalwallResult<()> {
        let family = family.into();
        let family = family.trim();
        if family.is_empty() {
            return Err(CalwallError::invalid_config("font family name must be non-empty"));
        }
        if bytes.is_empty() {
            return Err(CalwallError::invalid_config(format!(
                "font '{family}' has no data"
            )));
        }
        {
            let mut state = self.lock()?;
            state.faces.insert(family.to_string(), Arc::new(bytes));
            if state.fallback.is_none() {
                state.fallback = Some(family.to_string());
            }
        }
        tracing::debug!(family, "font registered");
        self.shared.changed.notify_all();
        Ok(())
    }

    pub fn register_file(&self, family: impl Into<String>, path: &Path) -> CalwallResult<()> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        self.register(family, bytes)
    }

    /// Make an already registered family the fallback.
    pub fn set_fallback(&self, family: &str) -> CalwallResult<()> {
        let mut state = self.lock()?;
        if !state.faces.contains_key(family) {
            return Err(CalwallError::invalid_config(format!(
                "fallback font '{family}' is not registered"
            )));
        }
        state.fallback = Some(family.to_string());
        Ok(())
    }

    pub fn fallback(&self) -> CalwallResult<Option<String>> {
        Ok(self.lock()?.fallback.clone())
    }

    pub fn is_ready(&self, family: &str) -> bool {
        self.lock()
            .map(|s| s.faces.contains_key(family))
            .unwrap_or(false)
    }

    pub fn families(&self) -> CalwallResult<Vec<String>> {
        Ok(self.lock()?.faces.keys().cloned().collect())
    }

    /// Bytes for `family`, or for the fallback family when it is missing.
    ///
    /// Returns the family actually resolved alongside its bytes.
    pub fn resolve(&self, family: &str) -> CalwallResult<(String, Arc<Vec<u8>>)> {
        let state = self.lock()?;
        if let Some(bytes) = state.faces.get(family) {
            return Ok((family.to_string(), bytes.clone()));
        }
        state
            .fallback
            .as_ref()
            .and_then(|name| state.faces.get(name).map(|b| (name.clone(), b.clone())))
            .ok_or_else(|| {
                CalwallError::render(format!(
                    "font '{family}' is not registered and no fallback font is available"
                ))
            })
    }

    /// Block until every family in `families` is registered or `timeout` elapses.
    pub fn wait_ready(&self, families: &[String], timeout: Duration) -> CalwallResult<()> {
        let start = Instant::now();
        let mut state = self.lock()?;
        loop {
            let missing: Vec<String> = families
                .iter()
                .filter(|f| !state.faces.contains_key(f.as_str()))
                .cloned()
                .collect();
            if missing.is_empty() {
                return Ok(());
            }

            let elapsed = start.elapsed();
            let Some(remaining) = timeout.checked_sub(elapsed).filter(|d| !d.is_zero()) else {
                return Err(CalwallError::FontLoadTimeout {
                    families: missing,
                    waited_ms: elapsed.as_millis() as u64,
                });
            };
            state = self
                .shared
                .changed
                .wait_timeout(state, remaining)
                .map_err(|_| CalwallError::render("font registry lock poisoned"))?
                .0;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
