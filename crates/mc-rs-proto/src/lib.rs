//! Typed packet models for the two protocols the gateway bridges.
//!
//! - [`bedrock`]: the client-facing protocol (Bedrock Edition).
//! - [`java`]: the backend protocol (Java Edition), split by direction.
//!
//! Byte-level (de)serialization is done by the network codecs that feed the
//! gateway; everything here is already decoded.

/// Declare a closed packet set: the packet enum, its `Copy` kind
/// discriminant, and `From` conversions for every member struct.
macro_rules! packet_set {
    (
        $(#[$meta:meta])*
        $packet:ident / $kind:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub enum $packet {
            $($variant($variant),)+
        }

        /// Discriminant of every packet in the set; used as the registry key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $kind {
            $($variant,)+
        }

        impl $packet {
            pub fn kind(&self) -> $kind {
                match self {
                    $(Self::$variant(_) => $kind::$variant,)+
                }
            }
        }

        impl $kind {
            /// All kinds, in declaration order.
            pub const ALL: &'static [$kind] = &[$($kind::$variant,)+];

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        $(
            impl From<$variant> for $packet {
                fn from(packet: $variant) -> Self {
                    Self::$variant(packet)
                }
            }

            impl $crate::PacketVariant<$packet> for $variant {
                type Kind = $kind;
                const KIND: $kind = $kind::$variant;

                fn extract(packet: &$packet) -> Option<&Self> {
                    match packet {
                        $packet::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}

/// A concrete packet struct that is one member of the packet set `P`.
pub trait PacketVariant<P>: Sized {
    type Kind: Copy;

    /// The set's discriminant for this struct.
    const KIND: Self::Kind;

    /// Borrow the struct back out of the set, if `packet` holds one.
    fn extract(packet: &P) -> Option<&Self>;
}

pub mod bedrock;
pub mod error;
pub mod java;
pub mod jwt;
pub mod types;
