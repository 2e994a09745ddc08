//! Host diagnostics page.
//!
//! Standalone, unguarded router reporting the machine hostname, its
//! resolved IP address and the full process environment. Served by the
//! `hostinfo` binary on its own listener; it never touches the config
//! store.

use std::net::ToSocketAddrs;

use axum::response::Html;
use axum::{routing::get, Router};

pub fn build_router() -> Router {
    Router::new().route("/", get(container_info))
}

pub async fn container_info() -> Html<String> {
    Html(render_container_info())
}

fn render_container_info() -> String {
    let hostname = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());
    let ip_address = resolve_ip(&hostname).unwrap_or_else(|| "unknown".to_string());

    let env_vars = std::env::vars()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("<br>");

    format!(
        "<h1>Container Information</h1>\n\
         <p><b>Hostname:</b> {hostname}</p>\n\
         <p><b>IP Address:</b> {ip_address}</p>\n\
         <h2>Environment Variables:</h2>\n\
         <pre>{env_vars}</pre>\n"
    )
}

// Containers frequently lack a resolvable hostname; the page still renders.
fn resolve_ip(hostname: &str) -> Option<String> {
    (hostname, 0)
        .to_socket_addrs()
        .ok()?
        .next()
        .map(|addr| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_lists_hostname_and_environment() {
        std::env::set_var("HOSTINFO_TEST_MARKER", "present");
        let page = render_container_info();
        assert!(page.contains("<h1>Container Information</h1>"));
        assert!(page.contains("<p><b>Hostname:</b>"));
        assert!(page.contains("<p><b>IP Address:</b>"));
        assert!(page.contains("HOSTINFO_TEST_MARKER: present"));
    }

    #[test]
    fn unresolvable_names_do_not_break_rendering() {
        assert_eq!(resolve_ip("definitely-not-a-real-host.invalid"), None);
    }
}
