//! Capability required of user data attached to vertices and edges.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Opaque user data that can be attached to a vertex or an edge.
///
/// The engine never inspects a payload. It only needs to copy it and to hand
/// it to a codec, so the capability is exactly `Serialize` (encode) plus
/// `DeserializeOwned` (decode). Any serde type qualifies through the blanket
/// implementation; `()` is the payload of graphs that carry none.
pub trait Payload: Serialize + DeserializeOwned + Clone + Debug {}

impl<T> Payload for T where T: Serialize + DeserializeOwned + Clone + Debug {}
