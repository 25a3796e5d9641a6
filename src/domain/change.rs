use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    #[serde(rename = "filename")]
    pub path: String,
}

#[cfg(test)]
impl ChangedFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}
