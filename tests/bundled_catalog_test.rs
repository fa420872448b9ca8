//! Lookups against the NETGEN resources shipped in `resources/`

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::path::PathBuf;

use googletest::prelude::*;
use pretty_assertions::assert_eq;
use ts_catalog::{
    Catalog,
    DuplicatePolicy,
    Locale,
    bundled,
};

fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources").join(name)
}

fn english() -> Catalog {
    Catalog::from_file(&resource("NETGENPlugin_msg_en.ts"), DuplicatePolicy::Reject).unwrap()
}

#[googletest::test]
fn test_lookup_present_key() {
    let catalog = english();

    expect_that!(catalog.lookup("NETGEN_COARSE"), eq("Coarse"));
    expect_that!(catalog.locale().map(Locale::as_str), some(eq("en")));
}

#[googletest::test]
fn test_lookup_absent_key_returns_key() {
    let catalog = english();

    expect_that!(catalog.lookup("NOT_A_KEY"), eq("NOT_A_KEY"));
    expect_that!(catalog.lookup_or("NOT_A_KEY", "fallback"), eq("fallback"));
    expect_that!(catalog.get("NOT_A_KEY"), none());
    expect_that!(catalog.require("NOT_A_KEY").unwrap_err().is_missing_translation(), eq(true));
}

#[test]
fn test_every_key_returns_its_stored_text() {
    for name in ["NETGENPlugin_msg_en.ts", "NETGENPlugin_msg_fr.ts", "NETGENPlugin_msg_ja.ts"] {
        let catalog = Catalog::from_file(&resource(name), DuplicatePolicy::Reject).unwrap();
        for message in catalog.messages() {
            assert_eq!(catalog.lookup(&message.source), message.translation, "{name}");
        }
    }
}

#[test]
fn test_loading_twice_is_deterministic() {
    let first = english();
    let second = english();

    let entries = |catalog: &Catalog| -> Vec<(String, String)> {
        catalog.keys().map(|key| (key.to_string(), catalog.lookup(key).to_string())).collect()
    };
    assert_eq!(entries(&first), entries(&second));
    assert_eq!(first, second);
}

#[test]
fn test_files_on_disk_match_embedded_set() {
    let set = bundled::catalog_set().unwrap();
    let french = Catalog::from_file(&resource("NETGENPlugin_msg_fr.ts"), DuplicatePolicy::Reject).unwrap();
    let locale = french.locale().cloned().unwrap();

    for key in french.keys() {
        assert_eq!(set.lookup(&locale, key), french.lookup(key));
    }
}

#[test]
fn test_formatting_preserves_entries() {
    for (name, content) in bundled::RESOURCES {
        let catalog = Catalog::load(content).unwrap();

        let reloaded = Catalog::load(&catalog.to_ts_string().unwrap()).unwrap();

        let entries = |c: &Catalog| -> Vec<(String, String)> {
            c.messages().map(|m| (m.source.clone(), m.translation.clone())).collect()
        };
        assert_eq!(entries(&reloaded), entries(&catalog), "{name}");
        assert_eq!(reloaded.locale(), catalog.locale(), "{name}");
    }
}
