use alloc::format;
use alloc::string::String;

use crate::types::ObjectAddress;

/// Trait for structs that provide metadata for logging
pub trait LogMetadata {
    fn meta(&self) -> String;
}

impl LogMetadata for ObjectAddress {
    fn meta(&self) -> String {
        format!(
            "index={:#06x}, subindex={:#04x}, node={}",
            self.index, self.subindex, self.node_id
        )
    }
}

// =============================================
// Diagnostic Macros (namespaced under crate::log)
// =============================================
//
// The core stays silent unless built with the `diagnostics` feature.
// Arguments are still type-checked when the feature is off.

// ===== diag_warn! =====
macro_rules! diag_warn {
    ($ctx:expr => $fmt:literal $(, $($arg:tt)+)?) => {{
        if cfg!(feature = "diagnostics") {
            let meta = $crate::log::LogMetadata::meta(&$ctx);
            log::warn!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
        }
    }};
    ($fmt:literal $(, $($arg:tt)+)?) => {{
        if cfg!(feature = "diagnostics") {
            log::warn!($fmt $(, $($arg)+)?);
        }
    }};
}

// ===== diag_debug! =====
macro_rules! diag_debug {
    ($ctx:expr => $fmt:literal $(, $($arg:tt)+)?) => {{
        if cfg!(feature = "diagnostics") {
            let meta = $crate::log::LogMetadata::meta(&$ctx);
            log::debug!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
        }
    }};
    ($fmt:literal $(, $($arg:tt)+)?) => {{
        if cfg!(feature = "diagnostics") {
            log::debug!($fmt $(, $($arg)+)?);
        }
    }};
}

// ===== diag_trace! =====
macro_rules! diag_trace {
    ($ctx:expr => $fmt:literal $(, $($arg:tt)+)?) => {{
        if cfg!(feature = "diagnostics") {
            let meta = $crate::log::LogMetadata::meta(&$ctx);
            log::trace!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
        }
    }};
    ($fmt:literal $(, $($arg:tt)+)?) => {{
        if cfg!(feature = "diagnostics") {
            log::trace!($fmt $(, $($arg)+)?);
        }
    }};
}

// Re-export macros for use in other files
pub(crate) use diag_warn;
pub(crate) use diag_debug;
pub(crate) use diag_trace;
