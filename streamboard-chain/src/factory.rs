//! Stream factory calldata.
//!
//! Builds the ABI-encoded `createStreamFor` payload for the factory
//! contract. Signing and submission stay with the caller's wallet.

use serde::{Deserialize, Serialize};

use streamboard_core::constants::SECONDS_PER_WEEK;
use streamboard_core::error::{Result, StreamboardError};

use crate::abi::{encode_address, encode_bool, encode_uint, parse_token_amount, selector};

/// Signature of the factory's stream creation function.
pub const CREATE_STREAM_SIGNATURE: &str =
    "createStreamFor(address,uint256,uint256,bool,address)";

/// Parameters of a new stream, as entered in the creation form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateStreamParams {
    /// Address the stream will release tokens to.
    pub recipient: String,
    /// Total capacity as a decimal token amount, e.g. `"1.5"`.
    pub cap: String,
    /// Release frequency in weeks.
    pub frequency_weeks: u64,
    /// Whether the stream starts with its full balance available.
    pub start_full: bool,
    /// Address of the streamed ERC-20 token.
    pub token: String,
}

/// ABI-encodes a `createStreamFor` call for the given parameters.
///
/// Returns 0x-prefixed calldata ready for an external wallet to sign and
/// submit against the factory contract.
pub fn create_stream_calldata(params: &CreateStreamParams) -> Result<String> {
    if params.frequency_weeks == 0 {
        return Err(StreamboardError::ValidationError(
            "frequency must be at least one week".into(),
        ));
    }

    let cap_raw = parse_token_amount(&params.cap)?;
    let frequency_seconds = params.frequency_weeks as u128 * SECONDS_PER_WEEK as u128;

    let mut data = Vec::with_capacity(4 + 5 * 32);
    data.extend_from_slice(&selector(CREATE_STREAM_SIGNATURE));
    data.extend_from_slice(&encode_address(&params.recipient)?);
    data.extend_from_slice(&encode_uint(cap_raw));
    data.extend_from_slice(&encode_uint(frequency_seconds));
    data.extend_from_slice(&encode_bool(params.start_full));
    data.extend_from_slice(&encode_address(&params.token)?);

    Ok(format!("0x{}", hex::encode(data)))
}
