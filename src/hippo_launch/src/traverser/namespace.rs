/// Resolve `namespace` below `base`
///
/// Relative namespaces are appended, absolute ones replace the base and an
/// empty namespace leaves the base unchanged.
pub fn join_namespace(base: &str, namespace: &str) -> String {
    let namespace = namespace.trim();
    if namespace.is_empty() {
        return base.to_string();
    }

    if namespace.starts_with('/') {
        let trimmed = namespace.trim_end_matches('/');
        return if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        namespace.trim_end_matches('/')
    )
}
