use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::audio::WavFile;

const URL_SCHEME: &str = "blob:roman-voice/";

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    live: HashMap<u64, WavFile>,
}

/// Table of addressable audio resources.
///
/// Every resource registered here stays allocated until its
/// [`ResourceHandle`] is released. Handles are single-threaded, matching the
/// event-loop model of the views that own them.
#[derive(Clone, Default)]
pub struct AudioRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl AudioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a WAV file and return a handle addressing it.
    pub fn create_playable_resource(&self, wav: WavFile) -> ResourceHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.live.insert(id, wav.clone());
        log::debug!(
            "Registered {}{id} ({} bytes, {} live)",
            URL_SCHEME,
            wav.len(),
            inner.live.len()
        );

        ResourceHandle {
            id,
            url: format!("{URL_SCHEME}{id}"),
            wav,
            registry: Rc::clone(&self.inner),
            released: false,
        }
    }

    /// Look up a live resource by URL, as a media element would.
    pub fn resolve(&self, url: &str) -> Option<WavFile> {
        let id: u64 = url.strip_prefix(URL_SCHEME)?.parse().ok()?;
        self.inner.borrow().live.get(&id).cloned()
    }

    /// Number of resources not yet released.
    pub fn live_count(&self) -> usize {
        self.inner.borrow().live.len()
    }
}

impl fmt::Debug for AudioRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

/// A registered audio resource.
///
/// Call [`release`](Self::release) when the resource is superseded or its
/// view goes away. A handle dropped without release frees its entry anyway
/// and logs a warning.
pub struct ResourceHandle {
    id: u64,
    url: String,
    wav: WavFile,
    registry: Rc<RefCell<RegistryInner>>,
    released: bool,
}

impl ResourceHandle {
    /// Address a media consumer can load.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn mime_type(&self) -> &'static str {
        WavFile::MIME_TYPE
    }

    pub fn wav(&self) -> &WavFile {
        &self.wav
    }

    /// Free the registry entry behind this handle.
    pub fn release(mut self) {
        self.unregister();
    }

    fn unregister(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        let removed = self.registry.borrow_mut().live.remove(&self.id).is_some();
        log::debug!("Released {}", self.url);
        removed
    }
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        if !self.released && self.unregister() {
            log::warn!("{} dropped without release()", self.url);
        }
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("url", &self.url)
            .field("bytes", &self.wav.len())
            .field("released", &self.released)
            .finish()
    }
}
