//! Reducto is a reduct-based solver for abstract argumentation frameworks.
//!
//! It decides the skeptical acceptance of an argument and enumerates the extensions
//! under the preferred and unchallenged semantics, and computes the initial sets of a framework.
//! The searches alternate between grounded reduction, decomposition into strongly connected components,
//! SAT-based enumeration of initial sets and reduction by the chosen sets.
//! They run on a bounded pool of workers sharing a cancellation signal.

#![warn(missing_docs)]

pub mod aa;

pub mod encodings;

pub mod io;

pub mod sat;

pub mod search;

pub mod solvers;

pub mod utils;
