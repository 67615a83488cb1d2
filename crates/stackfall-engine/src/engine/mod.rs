pub use self::placement::*;

pub(crate) mod placement;
