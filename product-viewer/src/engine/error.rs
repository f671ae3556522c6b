use thiserror::Error;

/// Failures while mapping viewer commands onto the loaded scene.
#[derive(Debug, Error, PartialEq)]
pub enum ViewerError {
    #[error("model is not loaded yet")]
    ModelNotLoaded,

    #[error("object '{0}' not found in scene")]
    ObjectNotFound(String),

    #[error("object '{0}' has no standard material")]
    MaterialMissing(String),

    #[error("unknown texture preset '{0}'")]
    UnknownTexture(String),

    #[error("unknown camera view '{0}'")]
    UnknownView(String),

    #[error("unknown animation clip '{0}'")]
    UnknownClip(String),

    #[error("light intensity must be a finite number, got {0}")]
    InvalidIntensity(f32),
}

impl ViewerError {
    /// True when the caller supplied a bad value rather than the scene being incomplete.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownTexture(_)
                | Self::UnknownView(_)
                | Self::UnknownClip(_)
                | Self::InvalidIntensity(_)
        )
    }
}
