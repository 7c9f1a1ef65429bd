//! Canonical UK station registry builder.
//!
//! Reconciles two National Rail feeds that describe the same stations
//! under different identifiers: the Knowledgebase stations XML (one
//! authoritative record per station) and the DTD timetable archive
//! (whose schedules reveal which operators actually call where). The
//! result is a single JSON registry keyed by CRS code.

pub mod build;
pub mod cif;
pub mod domain;
pub mod kb;
pub mod registry;
