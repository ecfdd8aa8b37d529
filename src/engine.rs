//! Capability boundary for the source map decoding engine.
//!
//! The resolver only needs four operations from a decoder: open a map,
//! query an original position, fetch embedded content, and release the
//! consumer. Expressing them as traits keeps the resolver testable against
//! a fake engine without a real map-format decoder.

use crate::error::Error;
use crate::types::{Position, RawMapping};

/// A decoding engine that can open map text into a queryable consumer.
pub trait MapEngine {
    /// The consumer type this engine produces.
    type Consumer: MapConsumer;

    /// Parse map text into a consumer bound to that map's content.
    ///
    /// # Errors
    ///
    /// Returns `Error::MapInvalid`, `Error::UnsupportedMapVersion`, or
    /// `Error::DecodeFailed` when the map cannot be decoded.
    fn open(&self, map_text: &str) -> Result<Self::Consumer, Error>;
}

/// A queryable view of one decoded source map.
pub trait MapConsumer {
    /// Release any resources held by the consumer. Called exactly once by
    /// [`ConsumerGuard`]; the consumer is not queried afterwards.
    fn close(&mut self);

    /// The original position for a position in generated coordinates.
    /// All fields are `None` when the position falls in an unmapped gap.
    fn original_position_for(&self, position: Position) -> RawMapping;

    /// The embedded original source text for a source path, if the map
    /// carries one.
    fn source_content_for(&self, source_path: &str) -> Option<String>;
}

/// Owns a consumer and closes it on drop, so release is guaranteed on every
/// exit path — including `?` early returns out of the resolver.
pub struct ConsumerGuard<C: MapConsumer> {
    /// The guarded consumer.
    consumer: C,
}

impl<C: MapConsumer> ConsumerGuard<C> {
    /// Take ownership of a consumer for the duration of one resolution.
    pub fn new(consumer: C) -> Self {
        Self { consumer }
    }
}

impl<C: MapConsumer> Drop for ConsumerGuard<C> {
    fn drop(&mut self) {
        self.consumer.close();
    }
}

impl<C: MapConsumer> std::ops::Deref for ConsumerGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.consumer
    }
}
