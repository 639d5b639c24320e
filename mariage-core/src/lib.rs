// mariage-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contrat du chargement en base (BulkLoader)
pub mod ports;

// 2. Domain (Cœur du métier)
// Normalisation, dimensions, résolution des personnes et des actes.
// Ne dépend de RIEN d'autre (ni infra, ni app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Lecture du fichier source, écriture des tables, DuckDB, configuration.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration (Pipeline, Load, Clean)
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::MariageError;
