//! Macro for building key/value sequences.
//!
//! # Examples
//!
//! ```
//! use logz::{kv, Logger};
//!
//! let logger = Logger::null();
//!
//! logger.info("server started", kv!["port", 8080, "tls", true]);
//! logger.debug_with_data(kv!["cache", "warm"]);
//! logger.info("nothing attached", kv![]);
//! ```

/// Build a [`KeyValues`](crate::KeyValues) from an alternating key, value list.
///
/// Every item goes through [`Value::from`](crate::Value). A trailing key with no
/// value is kept and paired with the `(MISSING)` placeholder.
///
/// # Examples
///
/// ```
/// use logz::{kv, Value};
///
/// let kvs = kv!["user", "ada", "attempts", 3];
/// assert_eq!(kvs.get("attempts"), Some(&Value::Int(3)));
///
/// let odd = kv!["dangling"];
/// assert_eq!(odd.get("dangling"), Some(&Value::Missing));
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        $crate::KeyValues::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::KeyValues::from_flat(vec![$($crate::Value::from($item)),+])
    };
}
