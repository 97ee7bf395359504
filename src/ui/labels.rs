use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::DialogError;

macro_rules! labels_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/labels/default.labels.json"
        ))
    };
}

#[derive(Deserialize)]
struct RawLabel {
    id: String,
    text: String,
    #[serde(default)]
    hotkey: Option<char>,
}

/// Caption and hotkey of a button kind such as `yes` or `ok`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLabel {
    pub text: String,
    pub hotkey: Option<char>,
}

#[derive(Debug, Clone, Default)]
pub struct LabelCatalog {
    labels: HashMap<String, ButtonLabel>,
}

impl LabelCatalog {
    /// Parses a JSON array of `{ "id", "text", "hotkey"? }` entries.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let raw: Vec<RawLabel> =
            serde_json::from_str(source).context("failed to parse button label catalog")?;
        let labels = raw
            .into_iter()
            .map(|entry| {
                let label = ButtonLabel {
                    text: entry.text,
                    hotkey: entry.hotkey.map(|key| key.to_ascii_lowercase()),
                };
                (entry.id, label)
            })
            .collect();
        Ok(Self { labels })
    }

    /// Entries of `overrides` replace same-named entries of `self`.
    pub fn merged(mut self, overrides: LabelCatalog) -> Self {
        self.labels.extend(overrides.labels);
        self
    }

    pub fn get(&self, id: &str) -> Result<&ButtonLabel, DialogError> {
        self.labels
            .get(id)
            .ok_or_else(|| DialogError::UnknownLabel(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

static DEFAULT_CATALOG: LazyLock<Arc<LabelCatalog>> = LazyLock::new(|| {
    let catalog =
        LabelCatalog::from_json_str(labels_source!()).expect("invalid labels/default.labels.json");
    Arc::new(catalog)
});

pub fn default_catalog() -> Arc<LabelCatalog> {
    Arc::clone(&DEFAULT_CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_dialog_buttons() {
        let catalog = default_catalog();
        for id in ["ok", "yes", "no"] {
            let label = catalog.get(id).expect("label present");
            assert!(label.hotkey.is_some(), "{id} needs a hotkey");
        }
    }

    #[test]
    fn overrides_replace_matching_ids_only() {
        let overrides =
            LabelCatalog::from_json_str(r#"[{"id": "yes", "text": "Sure", "hotkey": "S"}]"#)
                .expect("parse");
        let catalog = (*default_catalog()).clone().merged(overrides);
        assert_eq!(
            catalog.get("yes").expect("yes"),
            &ButtonLabel {
                text: "Sure".into(),
                hotkey: Some('s')
            }
        );
        assert_eq!(catalog.get("no").expect("no").text, "NO");
    }

    #[test]
    fn missing_label_is_reported_by_name() {
        let err = LabelCatalog::default().get("maybe").unwrap_err();
        assert_eq!(err, DialogError::UnknownLabel("maybe".into()));
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(LabelCatalog::from_json_str(r#"{"yes": "YES"}"#).is_err());
    }
}
