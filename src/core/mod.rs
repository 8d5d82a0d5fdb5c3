// Domain-layer modules and shared errors/models
pub mod classification {
    pub use crate::classification::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod normalizer {
    pub use crate::normalizer::*;
}

pub mod stats {
    pub use crate::stats::*;
}

pub mod errors {
    pub use crate::errors::*;
}
