//! Span definitions per pipeline stage: scan, consolidation, emit, store.

/// Create a scan span.
#[macro_export]
macro_rules! scan_span {
    ($source:expr) => {
        tracing::info_span!("waymem.scan", source = %$source)
    };
}

/// Create a consolidation span.
#[macro_export]
macro_rules! consolidation_span {
    ($map:expr, $incoming:expr) => {
        tracing::info_span!("waymem.consolidation", map = %$map, incoming = $incoming)
    };
}

/// Create an emit span.
#[macro_export]
macro_rules! emit_span {
    ($map:expr, $kind:expr) => {
        tracing::info_span!("waymem.emit", map = %$map, kind = %$kind)
    };
}

/// Create a store span.
#[macro_export]
macro_rules! store_span {
    ($backend:expr, $map:expr) => {
        tracing::info_span!("waymem.store", backend = ?$backend, map = %$map)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SCAN: &str = "waymem.scan";
    pub const CONSOLIDATION: &str = "waymem.consolidation";
    pub const EMIT: &str = "waymem.emit";
    pub const STORE: &str = "waymem.store";
}
