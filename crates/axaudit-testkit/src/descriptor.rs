//! In-memory descriptor sources for tests.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};
use std::sync::Mutex;

use axaudit_tree::DescriptorSource;
use axaudit_types::DescriptorId;

/// Descriptor source backed by a map of serialized documents. Each `open`
/// yields a fresh cursor over the stored bytes.
#[derive(Debug, Default)]
pub struct MapDescriptorSource {
    documents: BTreeMap<u64, Vec<u8>>,
}

impl MapDescriptorSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: u64, document: &str) -> Self {
        self.documents.insert(id, document.as_bytes().to_vec());
        self
    }
}

impl DescriptorSource for MapDescriptorSource {
    fn open(&self, id: DescriptorId) -> io::Result<Box<dyn Read + Send>> {
        match self.documents.get(&id.0) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no descriptor {}", id.0),
            )),
        }
    }
}

/// Wraps a source and fails the first `n` opens, for retry-path tests.
pub struct FlakySource<S> {
    inner: S,
    remaining_failures: Mutex<u32>,
}

impl<S: DescriptorSource> FlakySource<S> {
    pub fn failing_first(inner: S, failures: u32) -> Self {
        Self {
            inner,
            remaining_failures: Mutex::new(failures),
        }
    }
}

impl<S: DescriptorSource> DescriptorSource for FlakySource<S> {
    fn open(&self, id: DescriptorId) -> io::Result<Box<dyn Read + Send>> {
        let mut remaining = self.remaining_failures.lock().expect("failure counter");
        if *remaining > 0 {
            *remaining -= 1;
            return Err(io::Error::other("injected transient failure"));
        }
        drop(remaining);
        self.inner.open(id)
    }
}
