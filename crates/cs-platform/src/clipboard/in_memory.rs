use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};

use cs_core::ports::SystemClipboardPort;
use cs_core::Representation;

#[derive(Default)]
struct State {
    change_count: i64,
    representations: Vec<Representation>,
    write_count: usize,
}

/// Process-local clipboard with a change counter.
///
/// Useful for headless runs and for driving the capture pipeline in tests:
/// [`InMemoryClipboard::set_external`] simulates another application copying,
/// while [`SystemClipboardPort::write`] records what a restore wrote back.
#[derive(Default)]
pub struct InMemoryClipboard {
    state: Mutex<State>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("in-memory clipboard lock poisoned"))
    }

    /// Replace the content as if another application copied it.
    pub fn set_external(&self, representations: Vec<Representation>) -> Result<()> {
        let mut state = self.state()?;
        state.representations = representations;
        state.change_count += 1;
        Ok(())
    }

    pub fn contents(&self) -> Result<Vec<Representation>> {
        Ok(self.state()?.representations.clone())
    }

    /// Number of times [`SystemClipboardPort::write`] was called.
    pub fn write_count(&self) -> Result<usize> {
        Ok(self.state()?.write_count)
    }
}

impl SystemClipboardPort for InMemoryClipboard {
    fn change_count(&self) -> Result<i64> {
        Ok(self.state()?.change_count)
    }

    fn available_types(&self) -> Result<Vec<String>> {
        Ok(self
            .state()?
            .representations
            .iter()
            .map(|rep| rep.type_id.clone())
            .collect())
    }

    fn read(&self, type_id: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .state()?
            .representations
            .iter()
            .find(|rep| rep.type_id == type_id)
            .map(|rep| rep.bytes.clone()))
    }

    fn write(&self, representations: &[Representation]) -> Result<()> {
        let mut state = self.state()?;
        state.representations = representations.to_vec();
        state.change_count += 1;
        state.write_count += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut state = self.state()?;
        state.representations.clear();
        state.change_count += 1;
        Ok(())
    }
}
