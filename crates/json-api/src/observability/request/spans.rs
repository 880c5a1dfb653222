//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

/// Collapse identifier segments so every product or cart shares one label.
fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

    if segments.is_empty() {
        return "/".to_owned();
    }

    let mut route = String::new();
    let mut previous = "";

    for segment in segments {
        route.push('/');

        if Uuid::parse_str(segment).is_ok() {
            route.push_str("{id}");
        } else if previous == "slug" {
            route.push_str("{slug}");
        } else {
            route.push_str(segment);
        }

        previous = segment;
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_collapsed() {
        let names = request_span_name("GET", "/produk/0190f3c4-6a51-7b0e-9d35-4a8e2f1c7d90");

        assert_eq!(names.route, "/produk/{id}");
        assert_eq!(names.otel_span_name, "GET /produk/{id}");
    }

    #[test]
    fn slugs_are_collapsed() {
        assert_eq!(route_template("/produk/slug/kopi-susu"), "/produk/slug/{slug}");
    }

    #[test]
    fn root_and_plain_paths_are_kept() {
        assert_eq!(route_template("/"), "/");
        assert_eq!(route_template("/transaksi/keranjang/"), "/transaksi/keranjang");
    }
}
