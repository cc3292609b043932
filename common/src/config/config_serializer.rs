use serde::{Deserialize, Serialize};

/// Text format for the documents the workspace persists (client config, score file).
pub trait ConfigSerializer<TDocument> {
    fn serialize(&self, document: &TDocument) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TDocument, String>;
}

#[derive(Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self
    }
}

/// `Scores` rather than `common::scores::tally::Scores` in error messages.
fn document_name<TDocument>() -> &'static str {
    let full = std::any::type_name::<TDocument>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}

impl<TDocument> ConfigSerializer<TDocument> for YamlConfigSerializer
where
    TDocument: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, document: &TDocument) -> Result<String, String> {
        serde_yaml_ng::to_string(document)
            .map_err(|e| format!("Failed to write {} as YAML: {}", document_name::<TDocument>(), e))
    }

    fn deserialize(&self, content: &str) -> Result<TDocument, String> {
        // Editors on Windows like to prepend a byte order mark.
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to read {} from YAML: {}", document_name::<TDocument>(), e))
    }
}
