use std::fmt;

/// A required image or sound could not be loaded. Fatal at startup.
#[derive(Debug)]
pub enum AssetError {
    Texture { path: String, message: String },
    Sound { path: String, message: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Texture { path, message } => {
                write!(f, "failed to load texture {path}: {message}")
            },
            AssetError::Sound { path, message } => {
                write!(f, "failed to load sound {path}: {message}")
            },
        }
    }
}

impl std::error::Error for AssetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_file() {
        let err = AssetError::Sound {
            path: "assets/jump.wav".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load sound assets/jump.wav: not found"
        );
    }
}
