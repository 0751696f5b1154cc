pub mod target;
pub mod work;

#[doc(hidden)]
pub use {malachite_base, malachite_nz};

pub use target::{Target, TargetError};
pub use work::ChainWork;
