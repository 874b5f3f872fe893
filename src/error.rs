use std::fmt;

#[derive(Debug)]
pub enum PdfEmitError {
    Contract(String),
    PolygonMismatch { xs: usize, ys: usize },
    Image(String),
    Io(std::io::Error),
}

impl fmt::Display for PdfEmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfEmitError::Contract(message) => {
                write!(f, "call sequence violation: {}", message)
            }
            PdfEmitError::PolygonMismatch { xs, ys } => {
                write!(
                    f,
                    "polygon coordinate lists differ in length: {} x values, {} y values",
                    xs, ys
                )
            }
            PdfEmitError::Image(message) => write!(f, "image error: {}", message),
            PdfEmitError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for PdfEmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PdfEmitError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PdfEmitError {
    fn from(value: std::io::Error) -> Self {
        PdfEmitError::Io(value)
    }
}
