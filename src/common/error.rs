use derive_more::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
pub enum TraceError {
    #[display(fmt = "dimension mismatch: left side has {} columns but right side has {} rows", left, right)]
    DimensionMismatch { left: usize, right: usize },
    #[display(fmt = "operation requires a square matrix, got {}x{}", rows, cols)]
    NotSquare { rows: usize, cols: usize },
    #[display(fmt = "matrix is not invertible")]
    NotInvertible,
    #[display(fmt = "cannot normalize the zero vector")]
    ZeroVector,
    #[display(fmt = "index {} out of range for length {}", index, len)]
    IndexOutOfRange { index: usize, len: usize },
}

impl std::error::Error for TraceError {}
