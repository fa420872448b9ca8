//! Labels of the NETGEN hypothesis dialogs
//!
//! The plugin GUI never stores dialog strings directly: it derives message
//! keys from the hypothesis type name and resolves them through the loaded
//! catalogs. This module reproduces that derivation.

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogSet;
use crate::locale::Locale;

/// Help page shared by every NETGEN hypothesis dialog.
pub const HELP_PAGE: &str = "netgen_2d_3d_hypo_page.html";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown hypothesis type '{0}': expected one of {names}", names = HypothesisType::names())]
pub struct UnknownHypothesisType(pub String);

/// Hypothesis types edited through a NETGEN dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HypothesisType {
    #[serde(rename = "NETGEN_Parameters")]
    Parameters,
    #[serde(rename = "NETGEN_Parameters_2D")]
    Parameters2D,
    #[serde(rename = "NETGEN_SimpleParameters_2D")]
    SimpleParameters2D,
    #[serde(rename = "NETGEN_SimpleParameters_3D")]
    SimpleParameters3D,
}

impl HypothesisType {
    pub const ALL: [Self; 4] =
        [Self::Parameters, Self::Parameters2D, Self::SimpleParameters2D, Self::SimpleParameters3D];

    /// Type name as registered with the mesh module.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parameters => "NETGEN_Parameters",
            Self::Parameters2D => "NETGEN_Parameters_2D",
            Self::SimpleParameters2D => "NETGEN_SimpleParameters_2D",
            Self::SimpleParameters3D => "NETGEN_SimpleParameters_3D",
        }
    }

    #[must_use]
    pub const fn is_simple(self) -> bool {
        matches!(self, Self::SimpleParameters2D | Self::SimpleParameters3D)
    }

    #[must_use]
    pub const fn is_2d(self) -> bool {
        matches!(self, Self::Parameters2D | Self::SimpleParameters2D)
    }

    /// Key of the dialog caption (`NETGEN_2D_TITLE`, `NETGEN_SimpleParameters_3D_TITLE`).
    #[must_use]
    pub fn caption_key(self) -> String {
        format!("{}_TITLE", self.key_stem())
    }

    /// Key of the hypothesis type label (`NETGEN_3D_HYPOTHESIS`).
    #[must_use]
    pub fn type_key(self) -> String {
        format!("{}_HYPOTHESIS", self.key_stem())
    }

    /// Key of the dialog icon in the images catalog.
    #[must_use]
    pub fn icon_key(self) -> String {
        match self {
            Self::Parameters => "ICON_DLG_NETGEN_PARAMETERS".to_string(),
            Self::Parameters2D => "ICON_DLG_NETGEN_PARAMETERS_2D".to_string(),
            Self::SimpleParameters2D | Self::SimpleParameters3D => {
                format!("ICON_DLG_{}", self.name())
            }
        }
    }

    #[must_use]
    pub const fn help_page(self) -> &'static str {
        HELP_PAGE
    }

    /// Full dialogs use `NETGEN_2D`/`NETGEN_3D`, simple ones the type name.
    const fn key_stem(self) -> &'static str {
        match self {
            Self::Parameters => "NETGEN_3D",
            Self::Parameters2D => "NETGEN_2D",
            Self::SimpleParameters2D | Self::SimpleParameters3D => self.name(),
        }
    }

    fn names() -> String {
        Self::ALL.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for HypothesisType {
    type Err = UnknownHypothesisType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownHypothesisType(s.to_string()))
    }
}

impl fmt::Display for HypothesisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mesh fineness levels, in the order of the dialog combo box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Fineness {
    VeryCoarse,
    Coarse,
    Moderate,
    Fine,
    VeryFine,
    Custom,
}

/// Mesh parameters implied by a predefined fineness level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinenessPreset {
    pub growth_rate: f64,
    pub segments_per_edge: f64,
    pub segments_per_radius: f64,
}

impl Fineness {
    pub const ALL: [Self; 6] =
        [Self::VeryCoarse, Self::Coarse, Self::Moderate, Self::Fine, Self::VeryFine, Self::Custom];

    /// Level stored at `index` by the hypothesis, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::VeryCoarse => "NETGEN_VERYCOARSE",
            Self::Coarse => "NETGEN_COARSE",
            Self::Moderate => "NETGEN_MODERATE",
            Self::Fine => "NETGEN_FINE",
            Self::VeryFine => "NETGEN_VERYFINE",
            Self::Custom => "NETGEN_CUSTOM",
        }
    }

    /// Parameters the dialog fills in for this level; `None` for `Custom`.
    #[must_use]
    pub const fn preset(self) -> Option<FinenessPreset> {
        let (growth_rate, segments_per_edge, segments_per_radius) = match self {
            Self::VeryCoarse => (0.7, 0.3, 1.0),
            Self::Coarse => (0.5, 0.5, 1.5),
            Self::Moderate => (0.3, 1.0, 2.0),
            Self::Fine => (0.2, 2.0, 3.0),
            Self::VeryFine => (0.1, 3.0, 5.0),
            Self::Custom => return None,
        };
        Some(FinenessPreset { growth_rate, segments_per_edge, segments_per_radius })
    }
}

/// Dialog strings of one hypothesis type, resolved for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogLabels {
    pub hypothesis: HypothesisType,
    pub caption: String,
    pub type_name: String,
    /// Icon file name from the images catalog
    pub icon_file: String,
    pub help_page: &'static str,
    /// Fineness combo box entries; empty for simple hypotheses
    pub fineness: Vec<String>,
}

impl DialogLabels {
    /// Resolves every label of `hypothesis` through `set`.
    ///
    /// Untranslated keys resolve to themselves, as in the plugin GUI.
    #[must_use]
    pub fn resolve(set: &CatalogSet, locale: &Locale, hypothesis: HypothesisType) -> Self {
        let text = |key: &str| set.lookup(locale, key).to_string();

        let fineness = if hypothesis.is_simple() {
            Vec::new()
        } else {
            Fineness::ALL.iter().map(|level| text(level.label_key())).collect()
        };

        tracing::debug!(%hypothesis, %locale, "Resolved dialog labels");
        Self {
            hypothesis,
            caption: text(&hypothesis.caption_key()),
            type_name: text(&hypothesis.type_key()),
            icon_file: text(&hypothesis.icon_key()),
            help_page: hypothesis.help_page(),
            fineness,
        }
    }

    /// Icon file joined onto a plugin resource directory.
    #[must_use]
    pub fn icon_path(&self, resource_dir: &Path) -> PathBuf {
        resource_dir.join(&self.icon_file)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::bundled;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    #[rstest]
    #[case(HypothesisType::Parameters, "NETGEN_3D_TITLE", "NETGEN_3D_HYPOTHESIS", "ICON_DLG_NETGEN_PARAMETERS")]
    #[case(
        HypothesisType::Parameters2D,
        "NETGEN_2D_TITLE",
        "NETGEN_2D_HYPOTHESIS",
        "ICON_DLG_NETGEN_PARAMETERS_2D"
    )]
    #[case(
        HypothesisType::SimpleParameters2D,
        "NETGEN_SimpleParameters_2D_TITLE",
        "NETGEN_SimpleParameters_2D_HYPOTHESIS",
        "ICON_DLG_NETGEN_SimpleParameters_2D"
    )]
    #[case(
        HypothesisType::SimpleParameters3D,
        "NETGEN_SimpleParameters_3D_TITLE",
        "NETGEN_SimpleParameters_3D_HYPOTHESIS",
        "ICON_DLG_NETGEN_SimpleParameters_3D"
    )]
    fn test_keys(
        #[case] hypothesis: HypothesisType,
        #[case] caption: &str,
        #[case] type_name: &str,
        #[case] icon: &str,
    ) {
        assert_eq!(hypothesis.caption_key(), caption);
        assert_eq!(hypothesis.type_key(), type_name);
        assert_eq!(hypothesis.icon_key(), icon);
        assert_eq!(hypothesis.help_page(), "netgen_2d_3d_hypo_page.html");
    }

    #[googletest::test]
    fn test_parse_type_name() {
        expect_that!("NETGEN_Parameters_2D".parse::<HypothesisType>(), ok(eq(&HypothesisType::Parameters2D)));
        expect_that!(HypothesisType::SimpleParameters3D.to_string(), eq("NETGEN_SimpleParameters_3D"));

        let error = "NETGEN_Parameters_1D".parse::<HypothesisType>().unwrap_err();
        expect_that!(error.to_string(), contains_substring("NETGEN_Parameters_1D"));
        expect_that!(error.to_string(), contains_substring("NETGEN_SimpleParameters_2D"));
    }

    #[googletest::test]
    fn test_fineness() {
        expect_that!(Fineness::from_index(1), some(eq(Fineness::Coarse)));
        expect_that!(Fineness::from_index(6), none());
        expect_that!(Fineness::Custom.preset(), none());
        expect_that!(
            Fineness::Moderate.preset(),
            some(eq(FinenessPreset { growth_rate: 0.3, segments_per_edge: 1.0, segments_per_radius: 2.0 }))
        );
    }

    #[googletest::test]
    fn test_resolve_english() {
        let set = bundled::catalog_set().unwrap();

        let labels = DialogLabels::resolve(&set, &locale("en"), HypothesisType::Parameters2D);

        expect_that!(labels.caption, eq("Hypothesis Construction"));
        expect_that!(labels.type_name, eq("Netgen 2D"));
        expect_that!(labels.icon_file, eq("mesh_hypo_netgen_2d.png"));
        assert_eq!(labels.fineness, vec![
            "Very Coarse",
            "Coarse",
            "Moderate",
            "Fine",
            "Very Fine",
            "Custom"
        ]);
        expect_that!(
            labels.icon_path(Path::new("/opt/salome/resources")),
            eq(Path::new("/opt/salome/resources/mesh_hypo_netgen_2d.png"))
        );
    }

    #[rstest]
    #[case("fr", HypothesisType::Parameters, "Construction d'une hypothèse", "NETGEN 3D")]
    #[case("fr_FR", HypothesisType::SimpleParameters2D, "Construction d'une hypothèse", "NETGEN 2D paramètres simplifiés")]
    #[case("ja", HypothesisType::Parameters2D, "設定項目", "Netgen 2D")]
    #[case("ja", HypothesisType::SimpleParameters3D, "設定項目", "Netgen 3D 簡易パラメーター")]
    fn test_resolve_translated(
        #[case] tag: &str,
        #[case] hypothesis: HypothesisType,
        #[case] caption: &str,
        #[case] type_name: &str,
    ) {
        let set = bundled::catalog_set().unwrap();

        let labels = DialogLabels::resolve(&set, &locale(tag), hypothesis);

        assert_eq!(labels.caption, caption);
        assert_eq!(labels.type_name, type_name);
    }

    #[googletest::test]
    fn test_simple_dialog_has_no_fineness() {
        let set = bundled::catalog_set().unwrap();

        let labels = DialogLabels::resolve(&set, &locale("ja"), HypothesisType::SimpleParameters3D);

        expect_that!(labels.fineness, is_empty());
        expect_that!(labels.icon_file, eq("mesh_hypo_netgen.png"));
    }

    #[googletest::test]
    fn test_untranslated_keys_resolve_to_themselves() {
        let labels = DialogLabels::resolve(&CatalogSet::new(), &locale("en"), HypothesisType::Parameters);

        expect_that!(labels.caption, eq("NETGEN_3D_TITLE"));
        expect_that!(labels.icon_file, eq("ICON_DLG_NETGEN_PARAMETERS"));
    }
}
