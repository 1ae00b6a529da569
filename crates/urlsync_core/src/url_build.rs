use url::form_urlencoded::byte_serialize;

use crate::{Model, StoreRecord};

/// The leading `scheme://host` of `url`, for http(s) only.
pub fn base_url(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))?;
    let host_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    if host_len == 0 {
        return None;
    }
    let scheme_len = url.len() - rest.len();
    Some(&url[..scheme_len + host_len])
}

/// Canonical URL for the current store contents, or `None` when there is no usable base.
pub fn build_url(store: &StoreRecord) -> Option<String> {
    let base = base_url(store.url()?)?;
    let query = query_string(store);

    let mut out = String::with_capacity(base.len() + query.len() + 16);
    out.push_str(base);
    out.push('/');
    let routing = store.routing();
    match &routing.model {
        Some(model @ (Model::Single | Model::Range)) => {
            out.push_str(model.as_str());
            out.push('?');
        }
        Some(Model::Compare) => {
            out.push_str(Model::Compare.as_str());
            if let Some(kind) = routing.kind.as_deref() {
                out.push('/');
                out.push_str(kind);
            }
            out.push('?');
        }
        Some(Model::Other(_)) | None => {
            // A query still needs `?` here; `base/k=v` would not parse back.
            if !query.is_empty() {
                out.push('?');
            }
        }
    }
    out.push_str(&query);
    Some(out)
}

// `type` is deliberately not filtered here, so `compare` routes carry it twice.
fn query_string(store: &StoreRecord) -> String {
    let kind = store
        .reserved()
        .kind
        .as_deref()
        .map(|kind| ("type", kind.to_string()));
    let freeform = store
        .entries()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key, value.to_string()));

    kind.into_iter()
        .chain(freeform)
        .map(|(key, value)| format!("{}={}", encode(key), encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(text: &str) -> String {
    byte_serialize(text.as_bytes()).collect()
}
