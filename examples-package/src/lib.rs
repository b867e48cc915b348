//! Runnable demos for the rowcache workspace; see the `examples/` directory.
