// ABOUTME: Integration tests for type-safe identifiers and image references.
// ABOUTME: Tests image reference parsing and id behavior.

use container_intents::types::*;

mod image_ref_tests {
    use super::*;

    #[test]
    fn parse_simple_name() {
        let img = ImageRef::parse("nginx").unwrap();
        assert_eq!(img.name(), "nginx");
        assert_eq!(img.tag(), Some("latest"));
        assert!(img.registry().is_none());
        assert!(img.digest().is_none());
    }

    #[test]
    fn parse_name_with_tag() {
        let img = ImageRef::parse("nginx:1.25").unwrap();
        assert_eq!(img.name(), "nginx");
        assert_eq!(img.tag(), Some("1.25"));
    }

    #[test]
    fn parse_with_registry() {
        let img = ImageRef::parse("registry.example.com/myapp:v1.2.3").unwrap();
        assert_eq!(img.registry(), Some("registry.example.com"));
        assert_eq!(img.name(), "myapp");
        assert_eq!(img.tag(), Some("v1.2.3"));
    }

    #[test]
    fn parse_with_org() {
        let img = ImageRef::parse("ghcr.io/org/repo:latest").unwrap();
        assert_eq!(img.registry(), Some("ghcr.io"));
        assert_eq!(img.name(), "org/repo");
        assert_eq!(img.tag(), Some("latest"));
    }

    #[test]
    fn parse_with_digest() {
        let digest = "sha256:abc123def456";
        let img = ImageRef::parse(&format!("nginx@{}", digest)).unwrap();
        assert_eq!(img.name(), "nginx");
        assert_eq!(img.digest(), Some(digest));
        assert!(img.tag().is_none());
    }

    #[test]
    fn parse_full_reference() {
        let img = ImageRef::parse("ghcr.io/org/repo:v1@sha256:abc123").unwrap();
        assert_eq!(img.registry(), Some("ghcr.io"));
        assert_eq!(img.name(), "org/repo");
        assert_eq!(img.tag(), Some("v1"));
        assert_eq!(img.digest(), Some("sha256:abc123"));
    }

    #[test]
    fn parse_empty_returns_error() {
        assert!(ImageRef::parse("").is_err());
    }

    #[test]
    fn parse_invalid_chars_returns_error() {
        assert!(ImageRef::parse("invalid image!").is_err());
    }

    #[test]
    fn parse_registry_with_port() {
        let img = ImageRef::parse("localhost:5000/app").unwrap();
        assert_eq!(img.registry(), Some("localhost:5000"));
        assert_eq!(img.name(), "app");
        assert_eq!(img.tag(), Some("latest"));
        assert_eq!(img.repository(), "localhost:5000/app");
    }

    #[test]
    fn bare_name_displays_with_latest() {
        let img = ImageRef::parse("redis").unwrap();
        assert_eq!(img.to_string(), "redis:latest");
    }

    #[test]
    fn display_formats_correctly() {
        let img = ImageRef::parse("ghcr.io/org/repo:v1").unwrap();
        assert_eq!(img.to_string(), "ghcr.io/org/repo:v1");
    }
}

mod id_tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn container_id_stores_value() {
        let id = ContainerId::new("abc123".to_string());
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn network_id_stores_value() {
        let id = NetworkId::new("net456");
        assert_eq!(id.as_str(), "net456");
        assert_eq!(id.into_inner(), "net456");
    }

    #[test]
    fn image_id_stores_value() {
        let id = ImageId::new("sha256:abc");
        assert_eq!(id.as_str(), "sha256:abc");
    }

    #[test]
    fn short_form_is_twelve_characters() {
        let id = ContainerId::new("4f1c2a9e8b7d6c5b4a3f2e1d");
        assert_eq!(id.short(), "4f1c2a9e8b7d");
        assert_eq!(ContainerId::new("abc").short(), "abc");
    }

    #[test]
    fn ids_hash_by_value() {
        let ids: HashSet<ContainerId> = ["a", "b", "a"].into_iter().map(ContainerId::new).collect();
        assert_eq!(ids.len(), 2);
    }
}
