//! Core type definitions for ledger transactions.
//!
//! These types form the vocabulary of every transaction on the network.
//! Fixed-size values (addresses, digests, keys, signatures) are opaque byte
//! arrays here: their internal structure belongs to other layers. They are
//! `Copy` so that moving them around never touches the heap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TxError;

/// A consensus round number.
pub type Round = u64;

/// An asset identifier. Zero means "no asset" (or, in asset configuration,
/// "create a new one").
pub type AssetId = u64;

// ---------------------------------------------------------------------------
// Fixed-size byte values
// ---------------------------------------------------------------------------

/// Declares an opaque fixed-size byte value.
///
/// The all-zero value doubles as "unset", which is exactly how the canonical
/// encoder treats it. JSON renders the bytes as lowercase hex.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Length in bytes.
            pub const LENGTH: usize = $len;

            /// The all-zero value, read as "unset".
            pub const ZERO: Self = Self([0u8; $len]);

            /// Wraps raw bytes.
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Borrows the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns `true` if every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|&b| b == 0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&hex::encode(self.0))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use serde::de::Error;

                let text = String::deserialize(deserializer)?;
                let bytes = hex::decode(&text).map_err(D::Error::custom)?;
                <[u8; $len]>::try_from(bytes.as_slice())
                    .map(Self)
                    .map_err(|_| {
                        D::Error::custom(format!(
                            "{}: expected {} bytes, got {}",
                            stringify!($name),
                            $len,
                            bytes.len()
                        ))
                    })
            }
        }
    };
}

fixed_bytes!(
    /// An account address: the raw 32-byte public key, without checksum.
    Address,
    32
);

fixed_bytes!(
    /// A generic SHA-512/256 digest (genesis hash, group digest, metadata hash).
    Digest,
    32
);

fixed_bytes!(
    /// A lease token. While a transaction holding `(sender, lease)` is live,
    /// no other transaction with the same pair can be confirmed.
    Lease,
    32
);

fixed_bytes!(
    /// A participation voting public key.
    VotePk,
    32
);

fixed_bytes!(
    /// A VRF selection public key.
    VrfPk,
    32
);

fixed_bytes!(
    /// An Ed25519 public key, as it appears inside a multisignature.
    PublicKey,
    32
);

fixed_bytes!(
    /// An Ed25519 signature.
    Signature,
    64
);

// ---------------------------------------------------------------------------
// TxType
// ---------------------------------------------------------------------------

/// Discriminant for the operation a transaction represents.
///
/// The set is closed. The wire tag (`as_str`) is part of the interoperability
/// contract and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    /// Move native currency between accounts.
    #[serde(rename = "pay")]
    Payment,
    /// Register (or deregister) participation keys.
    #[serde(rename = "keyreg")]
    KeyRegistration,
    /// Create, reconfigure or destroy an asset.
    #[serde(rename = "acfg")]
    AssetConfig,
    /// Move asset units, opt in, or claw back.
    #[serde(rename = "axfer")]
    AssetTransfer,
    /// Freeze or unfreeze an account's asset holding.
    #[serde(rename = "afrz")]
    AssetFreeze,
}

impl TxType {
    /// Every known type, in wire-tag order.
    pub const ALL: [TxType; 5] = [
        TxType::AssetConfig,
        TxType::AssetFreeze,
        TxType::AssetTransfer,
        TxType::KeyRegistration,
        TxType::Payment,
    ];

    /// The wire tag written under the `type` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "pay",
            Self::KeyRegistration => "keyreg",
            Self::AssetConfig => "acfg",
            Self::AssetTransfer => "axfer",
            Self::AssetFreeze => "afrz",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(TxError::MissingTxType),
            "pay" => Ok(Self::Payment),
            "keyreg" => Ok(Self::KeyRegistration),
            "acfg" => Ok(Self::AssetConfig),
            "axfer" => Ok(Self::AssetTransfer),
            "afrz" => Ok(Self::AssetFreeze),
            other => Err(TxError::UnknownTxType(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
