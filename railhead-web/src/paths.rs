//! Mapping between browser locations and routes under a deployment base path.

/// Router base taken from `PUBLIC_URL` at compile time.
///
/// When set (e.g., `/play` for GitHub Pages) the base is applied to every
/// pushed location and stripped from every location read back. Local builds
/// without `PUBLIC_URL` use root-anchored paths.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

/// Drop `base` from the front of a browser location.
#[must_use]
pub fn strip_base(location: &str, base: Option<&str>) -> String {
    let Some(base) = base.filter(|b| !b.is_empty()) else {
        return location.to_string();
    };
    match location.strip_prefix(base) {
        Some("") => String::from("/"),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        Some(rest) if rest.starts_with(['#', '?']) => format!("/{rest}"),
        _ => location.to_string(),
    }
}

/// Browser location for a route under `base`.
#[must_use]
pub fn with_base(route: &str, base: Option<&str>) -> String {
    match base.filter(|b| !b.is_empty()) {
        Some(base) => match route.strip_prefix('/') {
            Some(rest) if rest.is_empty() || rest.starts_with(['#', '?']) => format!("{base}{rest}"),
            _ => format!("{base}{route}"),
        },
        None => route.to_string(),
    }
}
