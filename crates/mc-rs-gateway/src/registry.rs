//! Packet kind → translator tables.
//!
//! One registry per inbound direction, filled at start-up and shared
//! read-only by every session afterwards.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use mc_rs_proto::bedrock::BedrockPacket;
use mc_rs_proto::java::ClientboundPacket;
use mc_rs_proto::PacketVariant;
use tracing::{debug, error};

use crate::error::{RegistryError, TranslateError};
use crate::session::{Session, SessionHandle, SessionPhase};

/// Which side a packet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Backend → client.
    Java,
    /// Client → backend.
    Bedrock,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Java => "java",
            Self::Bedrock => "bedrock",
        })
    }
}

/// Earliest session phase a translator may run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Login, handshake and configuration packets; run in any phase.
    Login,
    /// Gameplay packets; run only once the session is `Playing`.
    Play,
}

/// A packet set the gateway receives.
pub trait InboundPacket: Send + Sync + 'static {
    type Kind: Copy + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync;

    const DIRECTION: Direction;

    fn kind(&self) -> Self::Kind;
}

impl InboundPacket for ClientboundPacket {
    type Kind = mc_rs_proto::java::ClientboundPacketKind;
    const DIRECTION: Direction = Direction::Java;

    fn kind(&self) -> Self::Kind {
        ClientboundPacket::kind(self)
    }
}

impl InboundPacket for BedrockPacket {
    type Kind = mc_rs_proto::bedrock::BedrockPacketKind;
    const DIRECTION: Direction = Direction::Bedrock;

    fn kind(&self) -> Self::Kind {
        BedrockPacket::kind(self)
    }
}

type Translate<P> = Box<dyn Fn(&mut Session, &P) -> Result<(), TranslateError> + Send + Sync>;

struct Entry<P> {
    stage: Stage,
    translate: Translate<P>,
}

/// Translators for one inbound direction, keyed by packet kind.
pub struct PacketTranslatorRegistry<P: InboundPacket> {
    translators: HashMap<P::Kind, Entry<P>>,
    ignored: HashSet<P::Kind>,
}

impl<P: InboundPacket> Default for PacketTranslatorRegistry<P> {
    fn default() -> Self {
        Self {
            translators: HashMap::new(),
            ignored: HashSet::new(),
        }
    }
}

impl<P: InboundPacket> PacketTranslatorRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the translator for packet struct `T`. Each kind may be
    /// registered once.
    pub fn register<T, F>(&mut self, stage: Stage, translator: F) -> Result<(), RegistryError>
    where
        T: PacketVariant<P, Kind = P::Kind> + 'static,
        F: Fn(&mut Session, &T) -> Result<(), TranslateError> + Send + Sync + 'static,
    {
        if self.translators.contains_key(&T::KIND) {
            return Err(RegistryError::Duplicate {
                direction: P::DIRECTION,
                kind: T::KIND.to_string(),
            });
        }
        let translate: Translate<P> = Box::new(move |session: &mut Session, packet: &P| {
            match T::extract(packet) {
                Some(inner) => translator(session, inner),
                None => Err(TranslateError::Invalid(format!(
                    "translator for {} got another packet",
                    T::KIND
                ))),
            }
        });
        self.translators.insert(T::KIND, Entry { stage, translate });
        Ok(())
    }

    /// Drop packets of `kind` without logging them as unhandled.
    pub fn ignore(&mut self, kind: P::Kind) {
        self.ignored.insert(kind);
    }

    pub fn is_ignored(&self, kind: P::Kind) -> bool {
        self.ignored.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    /// Run the translator for `packet` on the calling (session) task.
    ///
    /// Returns whether a translator ran to completion. Errors and panics
    /// inside a translator are logged and contained; the session carries
    /// on with the next packet.
    pub fn translate(&self, session: &mut Session, packet: &P) -> bool {
        if session.is_closed() {
            return false;
        }

        let kind = packet.kind();
        let Some(entry) = self.translators.get(&kind) else {
            if !self.ignored.contains(&kind) {
                debug!(
                    "Unhandled {} packet {kind} from {}",
                    P::DIRECTION,
                    session.display_name()
                );
            }
            return false;
        };

        if entry.stage == Stage::Play && session.phase() != SessionPhase::Playing {
            debug!(
                "Dropping {} packet {kind} for {} in phase {:?}",
                P::DIRECTION,
                session.display_name(),
                session.phase()
            );
            return false;
        }

        match panic::catch_unwind(AssertUnwindSafe(|| (entry.translate)(session, packet))) {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                error!(
                    "Failed to translate {} packet {kind} for {}: {e}",
                    P::DIRECTION,
                    session.display_name()
                );
                false
            }
            Err(cause) => {
                let message = cause
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| cause.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".into());
                error!(
                    "Translator for {} packet {kind} panicked for {}: {message}",
                    P::DIRECTION,
                    session.display_name()
                );
                false
            }
        }
    }

    /// Queue `packet` onto the session's task. Returns false when the
    /// session has ended.
    pub fn schedule(self: &Arc<Self>, handle: &SessionHandle, packet: P) -> bool {
        let registry = Arc::clone(self);
        handle.execute(move |session| {
            registry.translate(session, &packet);
        })
    }
}
