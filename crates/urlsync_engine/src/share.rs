use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;
use url::form_urlencoded;
use urlsync_core::StoreRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareTokenError {
    #[error("share token is not valid url-safe base64: {0}")]
    Base64(String),
    #[error("share token does not decode to utf-8 text")]
    Utf8,
}

/// Form-encode `pairs`, then wrap them in url-safe base64.
pub fn encode_share_token<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    general_purpose::URL_SAFE.encode(serializer.finish().as_bytes())
}

pub fn decode_share_token(token: &str) -> Result<Vec<(String, String)>, ShareTokenError> {
    let bytes = general_purpose::URL_SAFE
        .decode(token.trim())
        .map_err(|err| ShareTokenError::Base64(err.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|_| ShareTokenError::Utf8)?;
    Ok(form_urlencoded::parse(text.as_bytes())
        .into_owned()
        .collect())
}

/// Share token for the non-null field values of `record`, in store order.
pub fn share_token_for(record: &StoreRecord) -> String {
    let pairs: Vec<(String, String)> = record
        .entries()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    encode_share_token(&pairs)
}
