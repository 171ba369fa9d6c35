//! Mock implementations for testing
//!
//! In-process mixer double implementing the [`crate::mixer`] traits without
//! any hardware dependency, plus the shared [`CallJournal`] that sequencing
//! tests use to assert cross-component call order (mixer writes interleaved
//! with vendor driver calls).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::mixer::{ControlType, MixerBackend, MixerControl, MixerDevice, MixerError};

// ── Call journal ─────────────────────────────────────────────────────────────

/// Shared, ordered record of observed calls.
///
/// Clones share the same underlying journal, so one journal can be handed to
/// several mocks and the combined call order asserted afterwards.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallJournal {
    /// Create an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// Snapshot of all entries in call order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Discard all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A mock must stay usable after a panicking test thread.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Mock mixer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct ControlSpec {
    name: String,
    control_type: ControlType,
    fail_writes: bool,
}

#[derive(Debug)]
struct MixerState {
    journal: CallJournal,
    card_available: AtomicBool,
    controls: Mutex<Vec<ControlSpec>>,
    open_handles: AtomicUsize,
}

/// Scriptable mixer backend — records opens and writes for test assertions.
///
/// Clones share state, so the copy handed to the code under test and the copy
/// kept by the test observe the same controls and handle count.
#[derive(Debug, Clone)]
pub struct MockMixer {
    state: Arc<MixerState>,
}

impl MockMixer {
    /// Create a mock backend with no controls. The card starts available.
    #[must_use]
    pub fn new(journal: CallJournal) -> Self {
        Self {
            state: Arc::new(MixerState {
                journal,
                card_available: AtomicBool::new(true),
                controls: Mutex::new(Vec::new()),
                open_handles: AtomicUsize::new(0),
            }),
        }
    }

    /// Add a control with the given name and type.
    pub fn add_control(&self, name: &str, control_type: ControlType) {
        self.controls().push(ControlSpec {
            name: name.to_owned(),
            control_type,
            fail_writes: false,
        });
    }

    /// Make every subsequent write to `name` fail.
    pub fn fail_writes(&self, name: &str) {
        for spec in self.controls().iter_mut() {
            if spec.name == name {
                spec.fail_writes = true;
            }
        }
    }

    /// Script whether opening the card succeeds at all.
    pub fn set_card_available(&self, available: bool) {
        self.state
            .card_available
            .store(available, Ordering::Relaxed);
    }

    /// Number of card handles currently open (opened, not yet dropped).
    /// Zero after a well-behaved gateway call, including failing ones.
    #[must_use]
    pub fn open_handles(&self) -> usize {
        self.state.open_handles.load(Ordering::Relaxed)
    }

    fn controls(&self) -> std::sync::MutexGuard<'_, Vec<ControlSpec>> {
        self.state
            .controls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl MixerBackend for MockMixer {
    type Device = MockMixerCard;

    fn open(&self, card: u32) -> Result<Self::Device, MixerError> {
        if !self.state.card_available.load(Ordering::Relaxed) {
            return Err(MixerError::Unavailable { card });
        }
        self.state.journal.record(format!("mixer_open({card})"));
        self.state.open_handles.fetch_add(1, Ordering::Relaxed);
        Ok(MockMixerCard {
            state: Arc::clone(&self.state),
        })
    }
}

/// Open handle to the mock card. Dropping it "closes" the card, which the
/// handle-leak assertions in tests observe via [`MockMixer::open_handles`].
#[derive(Debug)]
pub struct MockMixerCard {
    state: Arc<MixerState>,
}

impl Drop for MockMixerCard {
    fn drop(&mut self) {
        self.state.open_handles.fetch_sub(1, Ordering::Relaxed);
    }
}

impl MixerDevice for MockMixerCard {
    type Control<'a> = MockControlHandle<'a>;

    fn control_by_name(&self, name: &str) -> Result<Self::Control<'_>, MixerError> {
        let spec = self
            .state
            .controls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|spec| spec.name == name)
            .cloned()
            .ok_or_else(|| MixerError::ControlNotFound {
                name: name.to_owned(),
            })?;
        Ok(MockControlHandle { card: self, spec })
    }
}

/// Borrowed handle to one scripted control.
#[derive(Debug)]
pub struct MockControlHandle<'a> {
    card: &'a MockMixerCard,
    spec: ControlSpec,
}

impl MixerControl for MockControlHandle<'_> {
    fn control_type(&self) -> ControlType {
        self.spec.control_type
    }

    fn set_bool(&self, index: u32, value: bool) -> Result<(), MixerError> {
        if self.spec.fail_writes {
            return Err(MixerError::WriteFailed {
                name: self.spec.name.clone(),
                reason: "scripted write failure".to_owned(),
            });
        }
        self.card.state.journal.record(format!(
            "ctl_write({}, {index}, {})",
            self.spec.name,
            u8::from(value)
        ));
        Ok(())
    }
}
