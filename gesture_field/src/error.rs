use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Frame dimensions must be positive and finite, got {width}x{height}")]
    FrameSize { width: f32, height: f32 },

    #[error("Particle pool must hold at least one particle")]
    EmptyPool,

    #[error("Friction must lie in (0, 1], got {0}")]
    Friction(f32),

    #[error("Speed cap must be positive, got {0}")]
    SpeedCap(f32),

    #[error("Life decay must be positive, got {0}")]
    LifeDecay(f32),

    #[error("Finger threshold ratio must be non-negative, got {0}")]
    FingerThreshold(f32),

    #[error("Point size must be at least 1")]
    PointSize,
}
