use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid config: {0}")]
    InvalidConfig(serde_wasm_bindgen::Error),
    #[error("serialization failed: {0}")]
    Serialization(serde_wasm_bindgen::Error),
    #[error("no browser window available")]
    NoWindow,
    #[error("could not schedule dealer loop: {0}")]
    Schedule(String),
}
