//! Route labels for spans and metrics.

/// Collapse numeric path segments so `/orders/42/status` and
/// `/orders/43/status` share one metric series.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut label = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            label.push('/');
        }

        if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            label.push_str("{id}");
        } else {
            label.push_str(segment);
        }
    }

    label
}

#[cfg(test)]
mod tests {
    use super::route_label;

    #[test]
    fn numeric_segments_are_collapsed() {
        assert_eq!(
            route_label("/admin/orders/42/status"),
            "/admin/orders/{id}/status"
        );
        assert_eq!(route_label("/cart/items/7"), "/cart/items/{id}");
    }

    #[test]
    fn static_paths_are_unchanged() {
        assert_eq!(route_label("/orders/history"), "/orders/history");
        assert_eq!(route_label("/"), "/");
    }
}
