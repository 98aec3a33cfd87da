//! Namespace flattening for element and attribute names

/// Strip a namespace prefix: `ui:Width` becomes `Width`
pub fn local_name(qualified: &str) -> &str {
    match qualified.split_once(':') {
        Some((_, local)) => local,
        None => qualified,
    }
}

/// True for `xmlns` and `xmlns:prefix` attributes
pub fn is_namespace_declaration(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}

/// Decode a raw XML name and strip its prefix
pub fn decode_local_name(raw: &[u8]) -> Result<String, std::str::Utf8Error> {
    std::str::from_utf8(raw).map(|name| local_name(name).to_string())
}
