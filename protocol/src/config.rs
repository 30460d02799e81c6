//! # Protocol Configuration & Constants
//!
//! Every magic number the transaction layer depends on lives here. If you're
//! hardcoding a prefix or a length somewhere else, you're doing it wrong.
//!
//! These values are part of the interoperability contract with the rest of
//! the network. Changing any of them changes every transaction ID ever
//! computed, so they are effectively frozen.

/// Version of this library, reported by tools built on it.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Domain Separation
// ---------------------------------------------------------------------------

/// Domain-separation prefix for an object type that might be hashed.
///
/// The prefix is prepended to the canonical encoding before hashing, so the
/// hash of a transaction can never collide with the hash of a vote even when
/// the residual bytes happen to coincide.
pub type HashId = &'static str;

// Hash IDs must be PREFIX-FREE: no hash ID may be a prefix of another.
// Keep the table in lexicographic order so that's easy to eyeball.

/// Block header.
pub const HASH_ID_BLOCK_HEADER: HashId = "BH";
/// Balance record.
pub const HASH_ID_BALANCE_RECORD: HashId = "BR";
/// Agreement credential.
pub const HASH_ID_CREDENTIAL: HashId = "CR";
/// Genesis block.
pub const HASH_ID_GENESIS: HashId = "GE";
/// Arbitrary signed message.
pub const HASH_ID_MESSAGE: HashId = "MX";
/// Flattened payset commitment.
pub const HASH_ID_PAYSET_FLAT: HashId = "PF";
/// Logic-signature program.
pub const HASH_ID_PROGRAM: HashId = "Program";
/// Signed transaction inside a block.
pub const HASH_ID_SIGNED_TXN_IN_BLOCK: HashId = "STIB";
/// Transaction group digest.
pub const HASH_ID_TX_GROUP: HashId = "TG";
/// Transaction Merkle leaf.
pub const HASH_ID_TXN_MERKLE_LEAF: HashId = "TL";
/// Transaction. The only prefix that feeds transaction IDs.
pub const HASH_ID_TRANSACTION: HashId = "TX";
/// Agreement vote.
pub const HASH_ID_VOTE: HashId = "VO";

/// All known hash IDs, used to check the prefix-free property.
pub const ALL_HASH_IDS: &[HashId] = &[
    HASH_ID_BLOCK_HEADER,
    HASH_ID_BALANCE_RECORD,
    HASH_ID_CREDENTIAL,
    HASH_ID_GENESIS,
    HASH_ID_MESSAGE,
    HASH_ID_PAYSET_FLAT,
    HASH_ID_PROGRAM,
    HASH_ID_SIGNED_TXN_IN_BLOCK,
    HASH_ID_TX_GROUP,
    HASH_ID_TXN_MERKLE_LEAF,
    HASH_ID_TRANSACTION,
    HASH_ID_VOTE,
];

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

/// Output length of SHA-512/256, and therefore of every digest and ID.
pub const DIGEST_LENGTH: usize = 32;

/// Length of an account address (a raw Ed25519 public key).
pub const ADDRESS_LENGTH: usize = 32;

/// Length of an Ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of a lease token.
pub const LEASE_LENGTH: usize = 32;

/// Length of the base-32 text form of a 32-byte ID without padding:
/// `ceil(32 * 8 / 5)`.
pub const TXID_TEXT_LENGTH: usize = 52;

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Maximum number of transactions in one atomic group.
pub const MAX_TX_GROUP_SIZE: usize = 16;

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Maximum container nesting accepted by the decoder. The deepest legitimate
/// structure (signed txn -> logic sig -> multisig -> subsig list -> subsig)
/// is five levels, so this leaves generous headroom while keeping hostile
/// input from blowing the stack.
pub const MAX_DECODE_DEPTH: usize = 32;
