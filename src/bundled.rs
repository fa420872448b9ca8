//! NETGEN plugin resources compiled into the binary

use std::path::Path;

use crate::catalog::{
    Catalog,
    CatalogSet,
    DuplicatePolicy,
};
use crate::error::CatalogError;
use crate::locale::Locale;

/// File name and content of every embedded resource.
pub const RESOURCES: [(&str, &str); 4] = [
    ("NETGENPlugin_images.ts", include_str!("../resources/NETGENPlugin_images.ts")),
    ("NETGENPlugin_msg_en.ts", include_str!("../resources/NETGENPlugin_msg_en.ts")),
    ("NETGENPlugin_msg_fr.ts", include_str!("../resources/NETGENPlugin_msg_fr.ts")),
    ("NETGENPlugin_msg_ja.ts", include_str!("../resources/NETGENPlugin_msg_ja.ts")),
];

/// Parses one embedded resource by file name.
///
/// # Errors
/// Returns [`CatalogError`] if the resource does not parse, which would be a
/// packaging defect.
pub fn catalog(file_name: &str) -> Option<Result<Catalog, CatalogError>> {
    RESOURCES.iter().find(|(name, _)| *name == file_name).map(|(name, content)| {
        Catalog::from_content(Path::new(name), content, DuplicatePolicy::Reject)
    })
}

/// All embedded resources, with English as the fallback locale.
///
/// # Errors
/// Returns [`CatalogError`] if an embedded resource does not parse.
pub fn catalog_set() -> Result<CatalogSet, CatalogError> {
    let mut set = CatalogSet::new().with_fallback_locales(vec![Locale::english()]);
    for (name, content) in RESOURCES {
        set.insert(Catalog::from_content(Path::new(name), content, DuplicatePolicy::Reject)?);
    }
    Ok(set)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    #[googletest::test]
    fn test_every_resource_parses() {
        for (name, _) in RESOURCES {
            let catalog = catalog(name).unwrap().unwrap();
            assert!(!catalog.is_empty(), "{name}");
        }
        expect_that!(catalog("NETGENPlugin_msg_de.ts"), none());
    }

    #[googletest::test]
    fn test_locales() {
        let set = catalog_set().unwrap();

        assert_eq!(set.locales(), vec![&locale("en"), &locale("fr_FR"), &locale("ja")]);
        expect_that!(set.neutral().len(), eq(1));
        assert_eq!(set.fallback_locales(), [locale("en")]);
    }

    #[rstest]
    #[case("en", "NETGEN_COARSE", "Coarse")]
    #[case("en", "NETGEN_2D_TITLE", "Hypothesis Construction")]
    #[case("fr", "NETGEN_2D_TITLE", "Construction d'une hypothèse")]
    #[case("fr_FR", "NETGEN_3D_HYPOTHESIS", "NETGEN 3D")]
    #[case("ja", "NETGEN_2D_TITLE", "設定項目")]
    #[case("ja", "ICON_DLG_NETGEN_PARAMETERS_2D", "mesh_hypo_netgen_2d.png")]
    #[case("de", "NETGEN_COARSE", "Coarse")]
    #[case("en", "NOT_A_KEY", "NOT_A_KEY")]
    fn test_lookup(#[case] tag: &str, #[case] key: &str, #[case] expected: &str) {
        let set = catalog_set().unwrap();
        assert_eq!(set.lookup(&locale(tag), key), expected);
    }

    #[googletest::test]
    fn test_missing_keys_by_language() {
        let set = catalog_set().unwrap();

        let from_language = set.missing_keys(&locale("fr"), &locale("en"));
        let from_region = set.missing_keys(&locale("fr_FR"), &locale("en"));

        expect_that!(from_language.len(), eq(39));
        expect_that!(from_language, contains(eq("LSZ_ENTRY_COLUMN")));
        assert_eq!(from_language, from_region);
        expect_that!(set.missing_keys(&locale("en"), &locale("fr")), is_empty());
        expect_that!(set.missing_keys(&locale("xx"), &locale("en")), is_empty());
    }
}
