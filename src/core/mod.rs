//! Core math shared by the catalog and scene code.

pub mod coordinates;
