//! Certificate chain and client data verification.

use md5::{Digest, Md5};
use mc_rs_crypto::{parse_public_key, verify_jwt, CryptoError, PublicKey};
use mc_rs_proto::bedrock::Login;
use mc_rs_proto::error::ProtoError;
use mc_rs_proto::jwt::{split_jwt, ClientData, IdentityClaims};
use mc_rs_proto::types::Uuid;

use super::AuthData;
use crate::error::AuthError;

/// Root key of the official authentication service, base64 SPKI DER.
pub const MOJANG_PUBLIC_KEY: &str = "MHYwEAYHKoZIzj0CAQYFK4EEACIDYgAECRXueJeTDqNRRgJi/vlRufByu/2G0i2Ebt6YMar5QX/R0DIIyrJMcUpruK4QveTfJSTp3Shlq4Gk34cD/4GUWwkv0DVuzeuB+tXija7HBxii03NHDbPAD0AKnLr2wdAp";

pub fn mojang_public_key() -> Result<PublicKey, CryptoError> {
    parse_public_key(MOJANG_PUBLIC_KEY)
}

/// Everything learned from a valid `Login` packet.
#[derive(Debug)]
pub struct VerifiedIdentity {
    pub data: AuthData,
    pub signed: bool,
    pub identity_key: PublicKey,
    pub client_data: ClientData,
}

/// Verify the login chain and client data.
///
/// Every link must be signed by the key named in its `x5u` header, and
/// that key must be the previous link's `identityPublicKey`. The chain is
/// *signed* when some link is signed by `trusted_root`.
pub fn verify_identity(
    login: &Login,
    trusted_root: &PublicKey,
    require_signed: bool,
) -> Result<VerifiedIdentity, AuthError> {
    let chain = verify_chain(&login.chain, trusted_root)?;
    if !chain.signed && require_signed {
        return Err(AuthError::UnsignedIdentity);
    }

    let extra = chain
        .claims
        .extra_data
        .ok_or_else(|| AuthError::MalformedChain("no extraData in identity".into()))?;
    let xuid = if chain.signed {
        extra
            .xuid
            .filter(|xuid| !xuid.is_empty())
            .ok_or(AuthError::MissingXuid)?
    } else {
        offline_xuid(&extra.display_name).to_string()
    };
    let data = AuthData {
        uuid: Uuid::parse(&extra.identity)?,
        name: extra.display_name,
        xuid,
    };

    verify_jwt(&login.client_data_jwt, &chain.identity_key)
        .map_err(|_| AuthError::ClientDataSignature)?;
    let payload = split_jwt(&login.client_data_jwt)?.decode_payload()?;
    let mut client_data: ClientData = serde_json::from_value(payload)
        .map_err(|e| ProtoError::JsonParse(format!("client data: {e}")))?;
    client_data.original_string = Some(login.client_data_jwt.clone());

    Ok(VerifiedIdentity {
        data,
        signed: chain.signed,
        identity_key: chain.identity_key,
        client_data,
    })
}

struct VerifiedChain {
    claims: IdentityClaims,
    identity_key: PublicKey,
    signed: bool,
}

fn verify_chain(chain: &[String], trusted_root: &PublicKey) -> Result<VerifiedChain, AuthError> {
    let mut expected_signer: Option<PublicKey> = None;
    let mut last_claims = None;
    let mut signed = false;

    for token in chain {
        let parts = split_jwt(token)?;
        let x5u = parts
            .decode_header()?
            .x5u
            .ok_or_else(|| AuthError::MalformedChain("link without x5u".into()))?;
        let signer =
            parse_public_key(&x5u).map_err(|e| AuthError::MalformedChain(e.to_string()))?;
        if expected_signer.as_ref().is_some_and(|expected| *expected != signer) {
            return Err(AuthError::MalformedChain(
                "link is not signed by the previous identity key".into(),
            ));
        }
        verify_jwt(token, &signer).map_err(|_| AuthError::ChainSignature)?;
        if signer == *trusted_root {
            signed = true;
        }

        let claims: IdentityClaims = serde_json::from_value(parts.decode_payload()?)
            .map_err(|e| AuthError::MalformedChain(e.to_string()))?;
        let next_key = claims
            .identity_public_key
            .as_deref()
            .ok_or_else(|| AuthError::MalformedChain("link without identityPublicKey".into()))?;
        expected_signer =
            Some(parse_public_key(next_key).map_err(|e| AuthError::MalformedChain(e.to_string()))?);
        last_claims = Some(claims);
    }

    match (last_claims, expected_signer) {
        (Some(claims), Some(identity_key)) => Ok(VerifiedChain {
            claims,
            identity_key,
            signed,
        }),
        _ => Err(AuthError::MalformedChain("empty chain".into())),
    }
}

/// Name-based (MD5, version 3) UUID of `name`.
pub fn name_uuid(name: &str) -> Uuid {
    let digest = Md5::digest(name.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    bytes[6] = (bytes[6] & 0x0f) | 0x30;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    Uuid::from_bytes(bytes)
}

/// The UUID an offline-mode Java server assigns to `name`.
pub fn offline_uuid(name: &str) -> Uuid {
    name_uuid(&format!("OfflinePlayer:{name}"))
}

/// Pseudo-XUID for a player whose identity is not signed. Always negative,
/// so it can never collide with a real XUID.
pub fn offline_xuid(name: &str) -> i64 {
    flip_to_negative(offline_uuid(name).least_significant as i64)
}

/// `0` becomes `i64::MIN`, positive values are negated, negative values
/// are kept.
pub fn flip_to_negative(value: i64) -> i64 {
    match value {
        0 => i64::MIN,
        v if v > 0 => -v,
        v => v,
    }
}
