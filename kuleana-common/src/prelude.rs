#[rustfmt::skip]
pub use crate::exception::{ErrorCode, KResult};
pub use crate::{fmt_err, str_err};

#[rustfmt::skip]
// std
pub use std::cmp::Ordering;
pub use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
pub use std::sync::atomic::{
    AtomicBool, AtomicI64, AtomicU32, AtomicUsize, Ordering as AtomicOrdering,
};
pub use std::sync::{Arc, Weak};

#[rustfmt::skip]
pub type InlineStr = smartstring::SmartString<smartstring::Compact>;
pub use once_cell::sync::{Lazy, OnceCell};
pub use parking_lot::{Mutex, RwLock};

#[rustfmt::skip]
pub use log::{debug, error, info, log_enabled, trace, warn, LevelFilter};
